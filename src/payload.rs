/// Number of argument slots every payload carries, whatever the operation's arity.
pub(crate) const ARG_SLOTS: usize = 3;

/// Placeholder written for an argument slot the operation does not use.
pub(crate) const EMPTY_SLOT: &str = " ";

/// One unit of work for the shortcut: the operation name plus three argument slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ShortcutCommand {
    function: String,
    args: [String; ARG_SLOTS],
}

impl ShortcutCommand {
    /// Absent slots become [`EMPTY_SLOT`]. Supplied values are flattened onto a
    /// single line so the payload keeps its four-line shape.
    pub(crate) fn new(function: impl Into<String>, args: [Option<String>; ARG_SLOTS]) -> Self {
        Self {
            function: function.into(),
            args: args.map(normalize_slot),
        }
    }

    pub(crate) fn function(&self) -> &str {
        &self.function
    }

    /// Build the four-line payload read by the shortcut:
    ///   1) function name
    ///   2) arg 1
    ///   3) arg 2
    ///   4) arg 3
    pub(crate) fn payload(&self) -> String {
        let mut lines: Vec<&str> = Vec::with_capacity(ARG_SLOTS + 1);
        lines.push(&self.function);
        lines.extend(self.args.iter().map(String::as_str));
        lines.join("\n")
    }
}

fn normalize_slot(value: Option<String>) -> String {
    match value {
        Some(value) if value.is_empty() => EMPTY_SLOT.to_string(),
        Some(value) if value.contains(is_line_break) => {
            value.replace("\r\n", " ").replace(is_line_break, " ")
        }
        Some(value) => value,
        None => EMPTY_SLOT.to_string(),
    }
}

fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(cmd: &ShortcutCommand) -> Vec<String> {
        cmd.payload().split('\n').map(str::to_string).collect()
    }

    #[test]
    fn payload_with_all_slots_filled() {
        let cmd = ShortcutCommand::new(
            "sendEmail",
            [
                Some("Alice".to_string()),
                Some("Hi".to_string()),
                Some("Subject".to_string()),
            ],
        );
        assert_eq!(lines(&cmd), vec!["sendEmail", "Alice", "Hi", "Subject"]);
    }

    #[test]
    fn payload_without_args_uses_space_placeholders() {
        let cmd = ShortcutCommand::new("listContacts", [None, None, None]);
        assert_eq!(cmd.payload(), "listContacts\n \n \n ");
        assert_eq!(lines(&cmd), vec!["listContacts", " ", " ", " "]);
    }

    #[test]
    fn payload_pads_trailing_slots() {
        let cmd = ShortcutCommand::new("phoneCall", [Some("Bob".to_string()), None, None]);
        assert_eq!(lines(&cmd), vec!["phoneCall", "Bob", " ", " "]);
        assert_eq!(cmd.args[1], EMPTY_SLOT);
        assert_eq!(cmd.function(), "phoneCall");
    }

    #[test]
    fn payload_has_no_trailing_newline() {
        let cmd = ShortcutCommand::new("listAlarms", [None, None, None]);
        assert!(!cmd.payload().ends_with('\n'));
    }

    #[test]
    fn empty_string_is_treated_as_absent() {
        let cmd = ShortcutCommand::new("deleteAlarm", [Some(String::new()), None, None]);
        assert_eq!(lines(&cmd), vec!["deleteAlarm", " ", " ", " "]);
    }

    #[test]
    fn multiline_argument_is_flattened() {
        let cmd = ShortcutCommand::new(
            "sendMessage",
            [
                Some("Alice".to_string()),
                Some("first line\r\nsecond\nthird".to_string()),
                None,
            ],
        );
        let lines = lines(&cmd);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[2], "first line second third");
    }

    #[test]
    fn payload_is_deterministic() {
        let build = || {
            ShortcutCommand::new(
                "setAlarm",
                [Some("Wake".to_string()), Some("07:00".to_string()), None],
            )
        };
        assert_eq!(build(), build());
        assert_eq!(build().payload(), build().payload());
    }
}
