pub const LINKS_COMMAND: &str = "links";

#[inline(always)]
pub(super) fn is_command(text: &str) -> bool {
    text.starts_with('/')
}

/// Any message starting with `/` that mentions `command` anywhere counts,
/// so `/links@bot` and `/linksplease` both list links.
#[inline]
pub(super) fn is_command_of(text: &str, command: &str) -> bool {
    is_command(text) && text.contains(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_command() {
        assert!(is_command_of("/links", LINKS_COMMAND));
        assert!(is_command_of("/links@some_bot", LINKS_COMMAND));
        assert!(is_command_of("/listsomething links", LINKS_COMMAND));
        assert!(is_command_of("/linkspam", LINKS_COMMAND));
    }

    #[test]
    fn test_command_not_start() {
        assert!(!is_command_of("  /links", LINKS_COMMAND));
        assert!(!is_command_of(
            "check this out /linkspam https://x.co",
            LINKS_COMMAND
        ));
    }

    #[test]
    fn test_command_case_sensitive() {
        assert!(!is_command_of("/LINKS", LINKS_COMMAND));
    }

    #[test]
    fn test_non_command() {
        assert!(!is_command(""));
        assert!(!is_command("links"));
        assert!(!is_command_of("/start", LINKS_COMMAND));
    }
}
