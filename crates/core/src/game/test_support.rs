//! Shared map fixtures for the rule and planner test suites.

use crate::state::GameState;

pub(crate) fn parse(text: &str) -> GameState {
    GameState::parse(text).expect("fixture map should parse")
}

/// Player boxed in on all four sides.
pub(crate) const WALLED_IN: &str = "\
%%%%%%%
%%%%%E%
%%P%%%%
%%%%%%%
%%%%%%%";

/// Food to the player's east, an adversary patrolling against the east wall.
pub(crate) const CORRIDOR: &str = "\
%%%%%%%%%
%       %
% P.  G%%
%      E%
%%%%%%%%%";

/// Power item beside the player with a wall right behind it.
pub(crate) const POWER_POCKET: &str = "\
%%%%%%%
%PO%  %
%     %
%    E%
%%%%%%%";

/// Player one step west of the second portal.
pub(crate) const PORTAL_ROOM: &str = "\
%%%%%%
%  P %
%  E %
%    %
%%%%%%";

/// Exit on the fourth portal, player one step west of the second.
pub(crate) const PORTAL_EXIT: &str = "\
%%%%%%
%  P %
%    %
%E   %
%%%%%%";

/// Non-square room that never ends on its own.
pub(crate) const ROTATION_ROOM: &str = "\
%%%%%%%
%  P  %
%    E%
% .   %
%%%%%%%";

/// Open room with one food item and no adversaries.
pub(crate) const OPEN_ROOM: &str = "\
%%%%%%%%%
%       %
% P   . %
%       %
%    E  %
%       %
%%%%%%%%%";

/// Food sealed behind walls, reachable only while phasing.
pub(crate) const SEALED_FOOD: &str = "\
%%%%%%%%%
%       %
%   P   %
%  E O  %
%   %%% %
%   %.% %
%%%%%%%%%";

/// Exit walled off on every side.
pub(crate) const SEALED_EXIT: &str = "\
%%%%%%%%%
%P      %
%   %   %
%  %E%  %
%   %   %
%       %
%%%%%%%%%";
