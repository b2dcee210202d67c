// Remote command table
//
// Maps the names people type (and the media-key names hosts emit) to the
// player's `cCMD_*` tokens. Lookup is case-insensitive and total: unknown
// names are passed through or guessed, never rejected here. The player is
// the one that rejects an invalid token.

/// Prefix shared by every protocol token.
pub const TOKEN_PREFIX: &str = "cCMD_";

/// Prefix of remote-control tokens, used when guessing unknown names.
pub const RC_PREFIX: &str = "cCMD_RC_";

/// Token for the compact playback status query.
pub const PST_TOKEN: &str = "cCMD_PST";

/// Token for the extended status query.
pub const STATUS_SIMPLE_TOKEN: &str = "cCMD_RC_STATUS_SIMPLE";

/// Alias → token, in display order. Several aliases share a token.
const COMMANDS: &[(&str, &str)] = &[
    // Power
    ("POWER", "cCMD_RC_POWER"),
    ("POWERON", "cCMD_RC_POWERON"),
    ("POWEROFF", "cCMD_RC_POWEROFF"),
    // Playback
    ("PLAYBACK", "cCMD_RC_PLAYBACK"),
    ("PLAY", "cCMD_RC_PLAYBACK"),
    ("PAUSE", "cCMD_RC_PAUSE"),
    ("STOP", "cCMD_RC_STOP"),
    ("MEDIA_PLAY", "cCMD_RC_PLAYBACK"),
    ("MEDIA_PAUSE", "cCMD_RC_PAUSE"),
    ("MEDIA_PLAY_PAUSE", "cCMD_RC_PAUSE"),
    ("MEDIA_STOP", "cCMD_RC_STOP"),
    // Navigation
    ("UP", "cCMD_RC_UP"),
    ("DOWN", "cCMD_RC_DOWN"),
    ("LEFT", "cCMD_RC_LEFT"),
    ("RIGHT", "cCMD_RC_RIGHT"),
    ("DPAD_UP", "cCMD_RC_UP"),
    ("DPAD_DOWN", "cCMD_RC_DOWN"),
    ("DPAD_LEFT", "cCMD_RC_LEFT"),
    ("DPAD_RIGHT", "cCMD_RC_RIGHT"),
    ("DPAD_CENTER", "cCMD_RC_SELECT"),
    ("SELECT", "cCMD_RC_SELECT"),
    ("OK", "cCMD_RC_SELECT"),
    ("RETURN", "cCMD_RC_RETURN"),
    ("BACK", "cCMD_RC_RETURN"),
    ("EXIT", "cCMD_RC_EXIT"),
    ("HOME", "cCMD_RC_MLTNAVI"),
    ("MENU", "cCMD_RC_MENU"),
    ("TITLE", "cCMD_RC_TITLE"),
    ("POPUP", "cCMD_RC_PUPMENU"),
    ("PUPMENU", "cCMD_RC_PUPMENU"),
    ("SETUP", "cCMD_RC_SETUP"),
    // Skip / chapter
    ("SKIPFWD", "cCMD_RC_SKIPFWD"),
    ("SKIPREV", "cCMD_RC_SKIPREV"),
    ("NEXT", "cCMD_RC_SKIPFWD"),
    ("PREV", "cCMD_RC_SKIPREV"),
    ("PREVIOUS", "cCMD_RC_SKIPREV"),
    ("MEDIA_NEXT", "cCMD_RC_SKIPFWD"),
    ("MEDIA_PREVIOUS", "cCMD_RC_SKIPREV"),
    // Fast forward
    ("CUE", "cCMD_RC_CUE"),
    ("FF", "cCMD_RC_CUE"),
    ("SEARCH_FWD1", "cCMD_RC_SEARCH_FWD1"),
    ("SEARCH_FWD2", "cCMD_RC_SEARCH_FWD2"),
    ("SEARCH_FWD3", "cCMD_RC_SEARCH_FWD3"),
    ("SEARCH_FWD4", "cCMD_RC_SEARCH_FWD4"),
    ("SEARCH_FWD5", "cCMD_RC_SEARCH_FWD5"),
    // Rewind
    ("REV", "cCMD_RC_REV"),
    ("REW", "cCMD_RC_REV"),
    ("SEARCH_REV1", "cCMD_RC_SEARCH_REV1"),
    ("SEARCH_REV2", "cCMD_RC_SEARCH_REV2"),
    ("SEARCH_REV3", "cCMD_RC_SEARCH_REV3"),
    ("SEARCH_REV4", "cCMD_RC_SEARCH_REV4"),
    ("SEARCH_REV5", "cCMD_RC_SEARCH_REV5"),
    // Slow motion
    ("SLOW_FWD1", "cCMD_RC_SLOW_FWD1"),
    ("SLOW_FWD2", "cCMD_RC_SLOW_FWD2"),
    ("SLOW_FWD3", "cCMD_RC_SLOW_FWD3"),
    ("SLOW_FWD4", "cCMD_RC_SLOW_FWD4"),
    ("SLOW_FWD5", "cCMD_RC_SLOW_FWD5"),
    // Frame advance
    ("FRAMEADV", "cCMD_RC_FRAMEADV"),
    ("REVERSEFRAMEADV", "cCMD_RC_REVERSEFRAMEADV"),
    // Tray
    ("OP_CL", "cCMD_RC_OP_CL"),
    ("EJECT", "cCMD_RC_OP_CL"),
    ("TRAYOPEN", "cCMD_RC_TRAYOPEN"),
    ("TRAYCLOSE", "cCMD_RC_TRAYCLOSE"),
    // Colour buttons
    ("RED", "cCMD_RC_RED"),
    ("GREEN", "cCMD_RC_GREEN"),
    ("YELLOW", "cCMD_RC_YELLOW"),
    ("BLUE", "cCMD_RC_BLUE"),
    // Digits
    ("D0", "cCMD_RC_D0"),
    ("D1", "cCMD_RC_D1"),
    ("D2", "cCMD_RC_D2"),
    ("D3", "cCMD_RC_D3"),
    ("D4", "cCMD_RC_D4"),
    ("D5", "cCMD_RC_D5"),
    ("D6", "cCMD_RC_D6"),
    ("D7", "cCMD_RC_D7"),
    ("D8", "cCMD_RC_D8"),
    ("D9", "cCMD_RC_D9"),
    ("0", "cCMD_RC_D0"),
    ("1", "cCMD_RC_D1"),
    ("2", "cCMD_RC_D2"),
    ("3", "cCMD_RC_D3"),
    ("4", "cCMD_RC_D4"),
    ("5", "cCMD_RC_D5"),
    ("6", "cCMD_RC_D6"),
    ("7", "cCMD_RC_D7"),
    ("8", "cCMD_RC_D8"),
    ("9", "cCMD_RC_D9"),
    // Audio / video settings
    ("AUDIOSEL", "cCMD_RC_AUDIOSEL"),
    ("AUDIO", "cCMD_RC_AUDIOSEL"),
    ("SUB_TITLE", "cCMD_RC_SUB_TITLE"),
    ("SUBTITLE", "cCMD_RC_SUB_TITLE"),
    ("DETAIL", "cCMD_RC_DETAIL"),
    ("INFO", "cCMD_RC_DETAIL"),
    ("DSPSEL", "cCMD_RC_DSPSEL"),
    ("DISPLAY", "cCMD_RC_DSPSEL"),
    ("OSDONOFF", "cCMD_RC_OSDONOFF"),
    ("3D", "cCMD_RC_3D"),
    ("PICTMD", "cCMD_RC_PICTMD"),
    ("PICTURESETTINGS", "cCMD_RC_PICTURESETTINGS"),
    ("HDR_PICTUREMODE", "cCMD_RC_HDR_PICTUREMODE"),
    // Apps
    ("NETFLIX", "cCMD_RC_NETFLIX"),
    ("NETWORK", "cCMD_RC_NETWORK"),
    ("MIRACAST", "cCMD_RC_MIRACAST"),
];

/// Look up a command alias (case-insensitive) in the table.
fn lookup(upper: &str) -> Option<&'static str> {
    COMMANDS
        .iter()
        .find(|(alias, _)| *alias == upper)
        .map(|(_, token)| *token)
}

/// Resolve a command name to its protocol token.
///
/// 1. Table lookup on the uppercased name.
/// 2. Names already starting with `cCMD_` are raw tokens and pass through.
/// 3. Anything else becomes `cCMD_RC_<UPPER>`, which the player may reject.
pub fn resolve(command: &str) -> String {
    let upper = command.to_uppercase();
    if let Some(token) = lookup(&upper) {
        return token.to_owned();
    }
    if command.starts_with(TOKEN_PREFIX) {
        return command.to_owned();
    }
    format!("{RC_PREFIX}{upper}")
}

/// Whether `command` is a documented alias.
pub fn is_known(command: &str) -> bool {
    lookup(&command.to_uppercase()).is_some()
}

/// Request body for a token. The coordinate suffix is required by the
/// player even for buttons that have no pointer semantics.
pub fn command_body(token: &str) -> String {
    format!("{token}.x=100&{token}.y=100")
}

/// Every `(alias, token)` pair in display order.
pub fn aliases() -> impl Iterator<Item = (&'static str, &'static str)> {
    COMMANDS.iter().copied()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn resolves_documented_aliases() {
        assert_eq!(resolve("PLAY"), "cCMD_RC_PLAYBACK");
        assert_eq!(resolve("EJECT"), "cCMD_RC_OP_CL");
        assert_eq!(resolve("HOME"), "cCMD_RC_MLTNAVI");
        assert_eq!(resolve("7"), "cCMD_RC_D7");
        assert_eq!(resolve("3D"), "cCMD_RC_3D");
        assert_eq!(resolve("MEDIA_PLAY_PAUSE"), "cCMD_RC_PAUSE");
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(resolve("play"), "cCMD_RC_PLAYBACK");
        assert_eq!(resolve("Search_Fwd3"), "cCMD_RC_SEARCH_FWD3");
        assert_eq!(resolve("dpad_center"), "cCMD_RC_SELECT");
    }

    #[test]
    fn every_alias_resolves_to_its_token_in_any_case() {
        for (alias, token) in aliases() {
            assert_eq!(resolve(alias), token);
            assert_eq!(resolve(&alias.to_lowercase()), token);
            assert!(token.starts_with(RC_PREFIX));
        }
    }

    #[test]
    fn raw_tokens_pass_through() {
        assert_eq!(resolve("cCMD_RC_CHROMECAST"), "cCMD_RC_CHROMECAST");
        assert_eq!(resolve("cCMD_PST"), "cCMD_PST");
    }

    #[test]
    fn unknown_names_are_guessed() {
        assert_eq!(resolve("rec"), "cCMD_RC_REC");
        assert_eq!(resolve("Zoom_In"), "cCMD_RC_ZOOM_IN");
        // Prefix match is case-sensitive: this one is guessed, not passed through.
        assert_eq!(resolve("ccmd_x"), "cCMD_RC_CCMD_X");
    }

    #[test]
    fn body_repeats_token_with_coordinates() {
        assert_eq!(
            command_body("cCMD_RC_STOP"),
            "cCMD_RC_STOP.x=100&cCMD_RC_STOP.y=100"
        );
    }

    #[test]
    fn known_aliases() {
        assert!(is_known("trayopen"));
        assert!(!is_known("cCMD_RC_TRAYOPEN"));
        assert!(!is_known("REC"));
    }
}
