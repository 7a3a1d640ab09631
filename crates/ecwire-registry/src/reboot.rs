//! Reboot command text surface.
//!
//! Input is a whitespace-separated sequence of case-insensitive keywords.
//! Each keyword either selects the action (exactly one is required; a later
//! action keyword overwrites an earlier one) or accumulates an additive
//! flag. Unrecognized keywords are ignored rather than rejected.

use ecwire_proto::commands::{
    REBOOT_CANCEL, REBOOT_COLD, REBOOT_COLD_AP_OFF, REBOOT_DISABLE_JUMP,
    REBOOT_FLAG_ON_AP_SHUTDOWN, REBOOT_HIBERNATE, REBOOT_JUMP_RO, REBOOT_JUMP_RW,
};

use crate::error::{RegistryError, Result};

/// Keyword summary shown by the reboot capability's read surface.
pub const REBOOT_USAGE: &str = "ro|rw|cancel|cold|disable-jump|hibernate|cold-ap-off [at-shutdown]";

/// Encoded reboot request payload: `{cmd, flags}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RebootRequest {
    pub cmd: u8,
    pub flags: u8,
}

impl RebootRequest {
    pub const SIZE: usize = 2;

    pub fn encode(&self) -> [u8; Self::SIZE] {
        [self.cmd, self.flags]
    }
}

struct Word {
    word: &'static str,
    cmd: u8,
    flags: u8,
}

// A zero flags field marks an action keyword.
const WORDS: &[Word] = &[
    Word { word: "cancel", cmd: REBOOT_CANCEL, flags: 0 },
    Word { word: "ro", cmd: REBOOT_JUMP_RO, flags: 0 },
    Word { word: "rw", cmd: REBOOT_JUMP_RW, flags: 0 },
    Word { word: "cold-ap-off", cmd: REBOOT_COLD_AP_OFF, flags: 0 },
    Word { word: "cold", cmd: REBOOT_COLD, flags: 0 },
    Word { word: "disable-jump", cmd: REBOOT_DISABLE_JUMP, flags: 0 },
    Word { word: "hibernate", cmd: REBOOT_HIBERNATE, flags: 0 },
    Word { word: "at-shutdown", cmd: 0, flags: REBOOT_FLAG_ON_AP_SHUTDOWN },
];

/// Parse a reboot command line into its wire payload.
///
/// Fails only when no action keyword is present; flags alone are not a
/// command.
pub fn parse_reboot(input: &str) -> Result<RebootRequest> {
    let mut cmd = None;
    let mut flags = 0u8;

    for token in input.split_whitespace() {
        match WORDS.iter().find(|w| token.eq_ignore_ascii_case(w.word)) {
            Some(word) if word.flags != 0 => flags |= word.flags,
            Some(word) => cmd = Some(word.cmd),
            None => tracing::debug!(token, "ignoring unrecognized reboot keyword"),
        }
    }

    match cmd {
        Some(cmd) => Ok(RebootRequest { cmd, flags }),
        None => Err(RegistryError::NoAction),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_action_keyword_alone_maps_to_its_command() {
        let cases = [
            ("cancel", REBOOT_CANCEL),
            ("ro", REBOOT_JUMP_RO),
            ("rw", REBOOT_JUMP_RW),
            ("cold", REBOOT_COLD),
            ("disable-jump", REBOOT_DISABLE_JUMP),
            ("hibernate", REBOOT_HIBERNATE),
            ("cold-ap-off", REBOOT_COLD_AP_OFF),
        ];
        for (input, cmd) in cases {
            let req = parse_reboot(input).unwrap();
            assert_eq!(req, RebootRequest { cmd, flags: 0 }, "keyword {input:?}");
        }
    }

    #[test]
    fn flag_is_additive_and_order_independent() {
        let expected = RebootRequest {
            cmd: REBOOT_JUMP_RO,
            flags: REBOOT_FLAG_ON_AP_SHUTDOWN,
        };
        assert_eq!(parse_reboot("ro at-shutdown").unwrap(), expected);
        assert_eq!(parse_reboot("at-shutdown ro").unwrap(), expected);
    }

    #[test]
    fn last_action_keyword_wins() {
        // Pins the tie-break: each action match overwrites the previous one.
        let req = parse_reboot("rw ro").unwrap();
        assert_eq!(req.cmd, REBOOT_JUMP_RO);

        let req = parse_reboot("ro rw").unwrap();
        assert_eq!(req.cmd, REBOOT_JUMP_RW);
    }

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(parse_reboot("RO").unwrap().cmd, REBOOT_JUMP_RO);
        assert_eq!(
            parse_reboot("Hibernate AT-SHUTDOWN").unwrap(),
            RebootRequest {
                cmd: REBOOT_HIBERNATE,
                flags: REBOOT_FLAG_ON_AP_SHUTDOWN,
            }
        );
    }

    #[test]
    fn empty_and_whitespace_only_input_fails() {
        assert!(matches!(parse_reboot(""), Err(RegistryError::NoAction)));
        assert!(matches!(parse_reboot("  \t\n"), Err(RegistryError::NoAction)));
    }

    #[test]
    fn unrecognized_tokens_are_ignored_not_rejected() {
        // Tolerance policy: junk alone still has no action, junk plus an
        // action succeeds.
        assert!(matches!(parse_reboot("bogus"), Err(RegistryError::NoAction)));

        let req = parse_reboot("bogus ro").unwrap();
        assert_eq!(req, RebootRequest { cmd: REBOOT_JUMP_RO, flags: 0 });
    }

    #[test]
    fn flag_alone_is_not_a_command() {
        assert!(matches!(
            parse_reboot("at-shutdown"),
            Err(RegistryError::NoAction)
        ));
    }

    #[test]
    fn payload_encoding_is_cmd_then_flags() {
        let req = RebootRequest {
            cmd: REBOOT_COLD,
            flags: REBOOT_FLAG_ON_AP_SHUTDOWN,
        };
        assert_eq!(req.encode(), [REBOOT_COLD, REBOOT_FLAG_ON_AP_SHUTDOWN]);
    }
}
