//! REPL command definitions and parsing.

use crate::chat::QuickAction;
use crate::error::CommandParseError;

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Blank line.
    Nothing,

    /// Free text for the advisor.
    Send(String),

    /// Run a quick action.
    Quick(QuickAction),

    /// Evaluate a trade.
    Trade(String),

    /// Open the settings form.
    OpenSettings,

    /// Edit the league id in the settings form.
    SetLeague(String),

    /// Edit the username in the settings form.
    SetUser(String),

    /// Edit brutal mode in the settings form.
    SetBrutal(bool),

    /// Save the settings form.
    SaveSettings,

    /// Close the settings form without saving.
    CancelSettings,

    /// Show the analysis panel.
    Panel,

    /// Toggle the execution trace in the panel.
    ToggleTrace,

    /// Backend health.
    Health,

    /// Backend workflow status.
    Status,

    /// Available LLMs.
    Llms,

    /// League info for the configured league.
    League,

    /// Roster of the configured user.
    Roster,

    /// Quick analysis of one aspect.
    QuickInfo(String),

    /// Reset the transcript.
    Clear,

    /// Show help.
    Help,

    /// Leave the REPL.
    Quit,
}

impl ReplCommand {
    /// Parse a line of input.
    ///
    /// # Errors
    ///
    /// Returns [`CommandParseError`] for an unknown slash command or a
    /// missing or invalid argument.
    pub fn parse(line: &str) -> Result<Self, CommandParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Self::Nothing);
        }
        let Some(rest) = line.strip_prefix('/') else {
            return Ok(Self::Send(line.to_string()));
        };

        let (cmd, args) = rest
            .split_once(char::is_whitespace)
            .map_or((rest, ""), |(c, a)| (c, a.trim()));
        let cmd = cmd.to_lowercase();

        match cmd.as_str() {
            "quick" => {
                let name = required(&cmd, args, "action")?;
                name.parse()
                    .map(Self::Quick)
                    .map_err(|message| CommandParseError::InvalidArgument {
                        command: cmd.clone(),
                        message,
                    })
            }
            "trade" => Ok(Self::Trade(required(&cmd, args, "details")?.to_string())),
            "settings" => Ok(Self::OpenSettings),
            "set" => parse_set(args),
            "save" => Ok(Self::SaveSettings),
            "cancel" => Ok(Self::CancelSettings),
            "panel" => Ok(Self::Panel),
            "trace" => Ok(Self::ToggleTrace),
            "health" => Ok(Self::Health),
            "status" => Ok(Self::Status),
            "llms" => Ok(Self::Llms),
            "league" => Ok(Self::League),
            "roster" => Ok(Self::Roster),
            "quickinfo" => Ok(Self::QuickInfo(
                required(&cmd, args, "analysis type")?.to_string(),
            )),
            "clear" => Ok(Self::Clear),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            _ => Err(CommandParseError::UnknownCommand { command: cmd }),
        }
    }
}

fn required<'a>(command: &str, args: &'a str, argument: &str) -> Result<&'a str, CommandParseError> {
    if args.is_empty() {
        Err(CommandParseError::MissingArgument {
            command: command.to_string(),
            argument: argument.to_string(),
        })
    } else {
        Ok(args)
    }
}

fn parse_set(args: &str) -> Result<ReplCommand, CommandParseError> {
    let (field, value) = args
        .split_once(char::is_whitespace)
        .map_or((args, ""), |(f, v)| (f, v.trim()));

    match field.to_lowercase().as_str() {
        "" => Err(CommandParseError::MissingArgument {
            command: "set".into(),
            argument: "field".into(),
        }),
        "league" => Ok(ReplCommand::SetLeague(value.to_string())),
        "user" | "username" => Ok(ReplCommand::SetUser(value.to_string())),
        "brutal" => match value.to_lowercase().as_str() {
            "on" | "true" | "yes" => Ok(ReplCommand::SetBrutal(true)),
            "off" | "false" | "no" => Ok(ReplCommand::SetBrutal(false)),
            _ => Err(CommandParseError::InvalidArgument {
                command: "set".into(),
                message: "brutal must be on or off".into(),
            }),
        },
        other => Err(CommandParseError::InvalidArgument {
            command: "set".into(),
            message: format!("unknown field '{other}', expected league, user or brutal"),
        }),
    }
}

/// Help text for the REPL.
pub const HELP_TEXT: &str = "\
Type a question and press enter. Messages mentioning analyze, team or grade
get a full team analysis; everything else is a quick chat answer.

  /quick <analyze|startsit|waiver|trade>  run a quick action
  /trade <details>                        evaluate a trade
  /settings                               open the settings form
  /set league <id> | user <name> | brutal <on|off>
  /save, /cancel                          save or discard the form
  /panel                                  show the latest analysis
  /trace                                  expand or collapse the execution trace
  /quickinfo <type>                       short analysis with key points
  /league, /roster                        Sleeper league and roster data
  /health, /status, /llms                 backend status
  /clear                                  reset the conversation
  /quit                                   leave";
