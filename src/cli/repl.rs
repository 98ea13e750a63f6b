//! Interactive line loop.
//!
//! Reads commands from any async line source and writes the conversation
//! to any async sink, so the loop can be driven from stdin/stdout or from
//! in-memory buffers in tests.

use std::collections::HashSet;
use std::fmt::Display;
use std::time::Duration;

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use super::commands::{ReplCommand, HELP_TEXT};
use super::render;
use crate::chat::{ChatController, Completion, MessageId, TurnRejected, TurnRequest};
use crate::error::{ApiError, AppError};
use crate::panel::AnalysisPanel;
use crate::traits::AdvisorApi;

/// How long a turn may run before the typing placeholder is printed.
const TYPING_DELAY: Duration = Duration::from_millis(250);

/// REPL over a [`ChatController`].
pub struct Repl<C> {
    controller: ChatController<C>,
    show_trace: bool,
    printed: HashSet<MessageId>,
}

impl<C: AdvisorApi> Repl<C> {
    /// Wrap a controller.
    pub fn new(controller: ChatController<C>) -> Self {
        Self {
            controller,
            show_trace: false,
            printed: HashSet::new(),
        }
    }

    /// The underlying controller.
    pub const fn controller(&self) -> &ChatController<C> {
        &self.controller
    }

    /// Run until end of input or `/quit`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Io`] if reading or writing fails. Command and
    /// API errors are reported inline and do not stop the loop.
    pub async fn run<R, W>(&mut self, input: R, output: &mut W) -> Result<(), AppError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        self.print_new_messages(output).await?;
        write_line(output, "Type /help for commands.").await?;

        let mut lines = input.lines();
        loop {
            output.write_all(b"> ").await?;
            output.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            if !self.handle_line(&line, output).await? {
                break;
            }
        }

        tracing::info!("REPL finished");
        Ok(())
    }

    /// Handle one line of input. Returns false when the user quits.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Io`] if writing fails.
    pub async fn handle_line<W>(&mut self, line: &str, output: &mut W) -> Result<bool, AppError>
    where
        W: AsyncWrite + Unpin,
    {
        let command = match ReplCommand::parse(line) {
            Ok(command) => command,
            Err(e) => {
                write_line(output, &format!("error: {e}")).await?;
                return Ok(true);
            }
        };

        match command {
            ReplCommand::Nothing => {}
            ReplCommand::Quit => return Ok(false),
            ReplCommand::Help => write_line(output, HELP_TEXT).await?,

            ReplCommand::Send(text) => self.turn(TurnRequest::Message(text), output).await?,
            ReplCommand::Quick(action) => self.turn(TurnRequest::Quick(action), output).await?,
            ReplCommand::Trade(details) => self.turn(TurnRequest::Trade(details), output).await?,

            ReplCommand::OpenSettings => {
                let mut session = self.controller.session().await;
                session.open_settings();
                let text = render::settings_form(session.settings_form());
                drop(session);
                write_line(output, &text).await?;
            }
            edit @ (ReplCommand::SetLeague(_)
            | ReplCommand::SetUser(_)
            | ReplCommand::SetBrutal(_)) => self.edit_settings(edit, output).await?,
            ReplCommand::SaveSettings => {
                let result = self.controller.session().await.submit_settings();
                match result {
                    Ok(()) => write_line(output, "Settings saved.").await?,
                    Err(e) => write_line(output, &format!("warning: {e}. Settings not saved.")).await?,
                }
            }
            ReplCommand::CancelSettings => {
                self.controller.session().await.settings_form_mut().cancel();
                write_line(output, "Settings unchanged.").await?;
            }

            ReplCommand::Panel => self.print_panel(output).await?,
            ReplCommand::ToggleTrace => {
                self.show_trace = !self.show_trace;
                self.print_panel(output).await?;
            }

            ReplCommand::Health => print_json(output, self.controller.health().await).await?,
            ReplCommand::Status => {
                print_json(output, self.controller.workflow_status().await).await?;
            }
            ReplCommand::Llms => {
                print_json(output, self.controller.available_llms().await).await?;
            }
            ReplCommand::League => print_json(output, self.controller.league_info().await).await?,
            ReplCommand::Roster => print_json(output, self.controller.user_roster().await).await?,
            ReplCommand::QuickInfo(kind) => match self.controller.quick_info(&kind).await {
                Ok(quick) => {
                    let mut text = quick.quick_analysis;
                    for point in quick.key_points {
                        text.push_str("\n  - ");
                        text.push_str(&point);
                    }
                    write_line(output, &text).await?;
                }
                Err(e) => self.report_error(&e, output).await?,
            },

            ReplCommand::Clear => {
                self.controller.session().await.reset();
                self.printed.clear();
                self.print_new_messages(output).await?;
            }
        }

        Ok(true)
    }

    async fn turn<W>(&mut self, request: TurnRequest, output: &mut W) -> Result<(), AppError>
    where
        W: AsyncWrite + Unpin,
    {
        let result = {
            let turn = self.controller.run_turn(request);
            tokio::pin!(turn);
            tokio::select! {
                result = &mut turn => result,
                () = tokio::time::sleep(TYPING_DELAY) => {
                    print_unseen(&self.controller, &mut self.printed, output).await?;
                    turn.await
                }
            }
        };

        match result {
            Ok(Completion::Applied | Completion::Stale) => self.print_new_messages(output).await,
            Err(TurnRejected::Empty) => Ok(()),
            Err(rejected @ TurnRejected::Busy) => {
                write_line(output, &format!("warning: {rejected}")).await
            }
            Err(rejected @ TurnRejected::SettingsIncomplete(_)) => {
                write_line(output, &format!("warning: {rejected}")).await?;
                let form = render::settings_form(self.controller.session().await.settings_form());
                write_line(output, &form).await
            }
        }
    }

    async fn edit_settings<W>(&self, command: ReplCommand, output: &mut W) -> Result<(), AppError>
    where
        W: AsyncWrite + Unpin,
    {
        let mut session = self.controller.session().await;
        session.open_settings();
        let form = session.settings_form_mut();
        match command {
            ReplCommand::SetLeague(v) => form.set_league_id(v),
            ReplCommand::SetUser(v) => form.set_username(v),
            ReplCommand::SetBrutal(v) => form.set_brutal_mode(v),
            _ => {}
        }
        let text = render::settings_form(session.settings_form());
        drop(session);
        write_line(output, &text).await
    }

    async fn print_panel<W>(&self, output: &mut W) -> Result<(), AppError>
    where
        W: AsyncWrite + Unpin,
    {
        let text = {
            let session = self.controller.session().await;
            AnalysisPanel::new(session.analysis())
                .with_trace(self.show_trace)
                .to_string()
        };
        output.write_all(text.as_bytes()).await?;
        output.flush().await?;
        Ok(())
    }

    async fn print_new_messages<W>(&mut self, output: &mut W) -> Result<(), AppError>
    where
        W: AsyncWrite + Unpin,
    {
        print_unseen(&self.controller, &mut self.printed, output).await
    }

    async fn report_error<W>(&self, error: &AppError, output: &mut W) -> Result<(), AppError>
    where
        W: AsyncWrite + Unpin,
    {
        tracing::warn!(error = %error, "Command failed");
        write_line(output, &format!("error: {error}")).await?;
        if matches!(error, AppError::Settings(_)) {
            let form = render::settings_form(self.controller.session().await.settings_form());
            write_line(output, &form).await?;
        }
        Ok(())
    }
}

/// Print transcript messages whose ids are not in `printed` yet.
async fn print_unseen<C, W>(
    controller: &ChatController<C>,
    printed: &mut HashSet<MessageId>,
    output: &mut W,
) -> Result<(), AppError>
where
    C: AdvisorApi,
    W: AsyncWrite + Unpin,
{
    let lines: Vec<String> = {
        let session = controller.session().await;
        session
            .transcript()
            .messages()
            .iter()
            .filter(|m| printed.insert(m.id.clone()))
            .map(render::message)
            .collect()
    };
    for line in lines {
        write_line(output, &line).await?;
    }
    Ok(())
}

async fn write_line<W>(output: &mut W, text: &str) -> Result<(), AppError>
where
    W: AsyncWrite + Unpin,
{
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await?;
    Ok(())
}

async fn print_json<W, E>(output: &mut W, result: Result<Value, E>) -> Result<(), AppError>
where
    W: AsyncWrite + Unpin,
    E: Display + Into<AppError>,
{
    match result {
        Ok(value) => {
            let text = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
            write_line(output, &text).await
        }
        Err(e) => {
            tracing::warn!(error = %e, "Lookup failed");
            let e: AppError = e.into();
            if matches!(e, AppError::Api(ApiError::Timeout { .. })) {
                write_line(output, "error: the advisor did not answer in time").await
            } else {
                write_line(output, &format!("error: {e}")).await
            }
        }
    }
}
