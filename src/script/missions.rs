//! The eight scripted missions that ship with the player.
//!
//! These follow the format documented in [`crate::script`]; custom missions
//! can be loaded from a file instead.

const MISSION1: &str = "\
3:45 - 7:30 - 10:00
AL 0:10 T+2 ST White
UA 0:55 T+3 IT
AL 1:50 T+4 T Blue
ID 2:20
CD 2:50 - 3:00
DT 3:05
ID 3:55
AL 4:00 T+5 IT
DT 4:25
AL 4:50 T+6 T Blue
CD 5:20 - 5:35
AL 5:50 T+7 ST Red
DT 6:35
CD 7:50 - 8:10
DT 8:20
CD 9:15 - 9:25
";

const MISSION2: &str = "\
4:00 - 07:45 - 10:20
UA 0:10 T+1 T Red
AL 0:35 T+2 IT
AL 1:30 T+3 T White
DT 2:00
AL 2:35 T+4 T Red
ID 3:10
ID 4:05
AL 4:15 T+5 T White
AL 4:50 T+6 SIT
CD 5:20 - 5:40
DT 5:45
AL 6:15 T+8 T Blue
ID 7:05
DT 8:00
CD 8:20 - 8:50
DT 9:25
";

const MISSION3: &str = "\
3:50 - 7:30 - 10:00
AL 0:10 T+2 IT
ID 0:50
AL 1:15 T+3 T Blue
CD 1:50 - 2:00
AL 2:15 T+4 IT
DT 3:05
AL 4:00 T+6 ST White
CD 4:30 - 4:50
AL 4:55 T+7 ST White
DT 5:20
ID 5:40
UA 5:55 T+8 T Red
DT 6:50
CD 7:40 - 8:00
DT 8:05
CD 8:15 - 8:25
";

const MISSION4: &str = "\
3:45 - 7:20 - 9:40
AL 0:10 T+1 T Red
UA 1:00 T+3 T White
ID 1:30
AL 1:55 T+4 ST Red
DT 2:25
DT 3:55
AL 4:10 T+5 SIT
ID 4:35
AL 5:00 T+6 ST Blue
CD 5:45 - 5:55
ID 6:25
CD 6:35 - 6:45
DT 7:35
CD 8:00 - 8:20
CD 8:55 - 9:10
";

const MISSION5: &str = "\
3:50 - 7:30 - 10:00
CD 0:10 - 0:15
AL 0:20 T+2 ST Blue
ID 1:05
AL 1:30 T+3 SIT
DT 2:20
AL 2:55 T+4 T Red
CD 4:00 - 4:25
AL 4:30 T+6 T Red
UA 5:05 T+7 IT
AL 6:00 T+8 T White
DT 6:35
DT 6:50
ID 7:45
DT 8:00
CD 8:20 - 8:40
";

const MISSION6: &str = "\
3:55 - 7:45 - 10:20
ID 0:10
AL 0:20 T+1 T Blue
AL 0:45 T+2 IT
AL 1:10 T+3 ST White
CD 1:30 - 1:40
ID 2:10
ID 3:00
AL 3:55 T+5 T Blue
DT 4:25
AL 4:45 T+6 IT
UA 5:20 T+7 T White
DT 6:05
AL 6:50 T+8 T Red
CD 8:00 - 8:30
CD 8:40 - 8:45
DT 9:40
";

const MISSION7: &str = "\
3:40 - 7:30 - 10:00
UA 0:10 T+1 T Blue
AL 0:35 T+3 ST Red
ID 1:10
AL 1:45 T+4 SIT
DT 2:15
CD 2:55 - 3:05
AL 3:45 T+5 T White
ID 4:05
AL 4:25 T+7 T Red
DT 4:50
AL 5:20 T+8 T White
DT 6:00
ID 7:35
CD 7:55 - 8:00
CD 8:05 - 8:15
CD 8:20 - 8:45
";

const MISSION8: &str = "\
3:25 - 7:15 - 9:40
AL 0:10 T+3 IT
CD 0:40 - 0:50
AL 1:10 T+4 ST Blue
CD 1:30 - 1:45
ID 2:30
ID 2:40
AL 3:30 T+5 ST White
CD 4:00 - 4:10
DT 4:35
AL 4:55 T+7 ST Red
DT 5:20
UA 6:20 T+8 T Blue
CD 7:30 - 7:40
DT 8:10
CD 8:50 - 9:10
";

const MISSIONS: [(&str, &str); 8] = [
    ("mission1", MISSION1),
    ("mission2", MISSION2),
    ("mission3", MISSION3),
    ("mission4", MISSION4),
    ("mission5", MISSION5),
    ("mission6", MISSION6),
    ("mission7", MISSION7),
    ("mission8", MISSION8),
];

/// Look up a built-in mission script by name.
pub fn builtin(name: &str) -> Option<&'static str> {
    MISSIONS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, text)| *text)
}

/// Names of all built-in missions, in order.
pub fn names() -> impl Iterator<Item = &'static str> {
    MISSIONS.iter().map(|(n, _)| *n)
}
