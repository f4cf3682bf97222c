use super::{ARG_SLOTS, ShortcutCommand, ToolCallError, required_arg};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParamKind {
    String,
    Integer,
}

impl ParamKind {
    pub(crate) fn json_type(self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Integer => "integer",
        }
    }
}

#[derive(Debug)]
pub(crate) struct ParamSpec {
    pub(crate) name: &'static str,
    pub(crate) kind: ParamKind,
    pub(crate) description: &'static str,
}

/// One operation the shortcut understands, with its parameters in payload order.
#[derive(Debug)]
pub(crate) struct ToolSpec {
    pub(crate) name: &'static str,
    pub(crate) description: &'static str,
    pub(crate) params: &'static [ParamSpec],
}

const fn text(name: &'static str, description: &'static str) -> ParamSpec {
    ParamSpec {
        name,
        kind: ParamKind::String,
        description,
    }
}

const fn integer(name: &'static str, description: &'static str) -> ParamSpec {
    ParamSpec {
        name,
        kind: ParamKind::Integer,
        description,
    }
}

pub(crate) static TOOLS: &[ToolSpec] = &[
    ToolSpec {
        name: "sendMessage",
        description: "Send a text message to a contact.",
        params: &[
            text("name", "Contact name"),
            text("message", "Message body"),
        ],
    },
    ToolSpec {
        name: "phoneCall",
        description: "Place a phone call to a contact.",
        params: &[text("name", "Contact name")],
    },
    ToolSpec {
        name: "facetimeCall",
        description: "Start a FaceTime call with a contact.",
        params: &[text("name", "Contact name")],
    },
    ToolSpec {
        name: "sendEmail",
        description: "Send an email to a contact.",
        params: &[
            text("name", "Contact name"),
            text("message", "Email body"),
            text("subject", "Email subject"),
        ],
    },
    ToolSpec {
        name: "listContacts",
        description: "List contacts.",
        params: &[],
    },
    ToolSpec {
        name: "listPastCalendarEvents",
        description: "List calendar events in a past window.",
        params: &[
            integer("number", "How many units to look back"),
            text("unit", "Time unit, e.g. days or weeks"),
        ],
    },
    ToolSpec {
        name: "listFutureCalendarEvents",
        description: "List calendar events in an upcoming window.",
        params: &[
            integer("number", "How many units to look ahead"),
            text("unit", "Time unit, e.g. days or weeks"),
        ],
    },
    ToolSpec {
        name: "listTodayCalendarEvents",
        description: "List today's calendar events.",
        params: &[],
    },
    ToolSpec {
        name: "createCalendarEvent",
        description: "Create a calendar event.",
        params: &[
            text("title", "Event title"),
            text("start_time", "Start date and time"),
            text("end_time", "End date and time"),
        ],
    },
    ToolSpec {
        name: "listReminders",
        description: "List reminders.",
        params: &[],
    },
    ToolSpec {
        name: "addReminder",
        description: "Add a reminder to a list.",
        params: &[
            text("reminder_name", "Reminder text"),
            text("list_name", "Reminders list to add it to"),
        ],
    },
    ToolSpec {
        name: "getCurrentWeather",
        description: "Get the current weather.",
        params: &[],
    },
    ToolSpec {
        name: "getWeatherForecast",
        description: "Get the weather forecast.",
        params: &[],
    },
    ToolSpec {
        name: "setAlarm",
        description: "Create an alarm.",
        params: &[
            text("alarm_name", "Alarm label"),
            text("time", "Alarm time"),
        ],
    },
    ToolSpec {
        name: "deleteAlarm",
        description: "Delete an alarm.",
        params: &[text("alarm_name", "Alarm label")],
    },
    ToolSpec {
        name: "listAlarms",
        description: "List alarms.",
        params: &[],
    },
];

pub(crate) fn find_tool(name: &str) -> Option<&'static ToolSpec> {
    TOOLS.iter().find(|tool| tool.name == name)
}

impl ToolSpec {
    pub(crate) fn input_schema(&self) -> serde_json::Value {
        let properties: serde_json::Map<String, serde_json::Value> = self
            .params
            .iter()
            .map(|param| {
                (
                    param.name.to_string(),
                    serde_json::json!({
                        "type": param.kind.json_type(),
                        "description": param.description,
                    }),
                )
            })
            .collect();
        let required: Vec<&str> = self.params.iter().map(|param| param.name).collect();
        serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    pub(crate) fn definition_json(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": self.input_schema(),
        })
    }

    /// Shape a call's `arguments` object into this operation's command.
    pub(crate) fn command(
        &self,
        arguments: &serde_json::Value,
    ) -> Result<ShortcutCommand, ToolCallError> {
        debug_assert!(self.params.len() <= ARG_SLOTS, "{} has too many parameters", self.name);
        if !(arguments.is_object() || arguments.is_null()) {
            return Err(ToolCallError::InvalidArguments(
                "arguments must be an object".to_string(),
            ));
        }

        let mut slots: [Option<String>; ARG_SLOTS] = Default::default();
        for (slot, param) in slots.iter_mut().zip(self.params) {
            let value = required_arg(arguments, param.name)?;
            let text = match param.kind {
                ParamKind::String => value.into_text(param.name)?,
                ParamKind::Integer => value.into_integer_text(param.name)?,
            };
            *slot = Some(text);
        }
        Ok(ShortcutCommand::new(self.name, slots))
    }
}

pub(crate) fn tool_definitions_json() -> Vec<serde_json::Value> {
    TOOLS.iter().map(ToolSpec::definition_json).collect()
}
