use std::io::{self, Write};

use minichat_common::clock::Clock;
use minichat_common::view::ViewConfig;
use minichat_common::{Command, Controller, Effects};

use crate::command::{ConsoleCommand, HELP};
use crate::render;

/// Whether the read loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A controller plus the output settings chosen on the command line.
pub struct Session<C> {
    controller: Controller<C>,
    config: ViewConfig,
    json: bool,
}

impl<C: Clock> Session<C> {
    pub fn new(controller: Controller<C>, config: ViewConfig, json: bool) -> Self {
        Self {
            controller,
            config,
            json,
        }
    }

    pub fn controller(&self) -> &Controller<C> {
        &self.controller
    }

    /// Run one command and write its result followed by the redrawn view.
    pub fn execute(&mut self, command: ConsoleCommand, out: &mut impl Write) -> io::Result<Flow> {
        let effects = match command {
            ConsoleCommand::Send { text, priority } => {
                Some(self.controller.dispatch(Command::Send { text, priority }))
            }
            ConsoleCommand::Receive => Some(self.controller.dispatch(Command::Receive)),
            ConsoleCommand::Delete(id) => Some(self.controller.dispatch(Command::Delete { id })),
            ConsoleCommand::Undo => Some(self.controller.dispatch(Command::Undo)),
            ConsoleCommand::DeleteSelected => {
                let effects = self.controller.delete_selected();
                if effects.is_none() {
                    writeln!(out, "nothing selected")?;
                }
                effects
            }
            ConsoleCommand::Select(id) => {
                match self.controller.select_message(id) {
                    Ok(message) => writeln!(out, "selected {} \"{}\"", message.id, message.text)?,
                    Err(err) => writeln!(out, "cannot select: {err}")?,
                }
                None
            }
            ConsoleCommand::Member(id) => {
                match self.controller.select_member(&id) {
                    Ok(member) => writeln!(out, "chatting with {}", member.name)?,
                    Err(err) => writeln!(out, "{err}")?,
                }
                None
            }
            ConsoleCommand::Show => None,
            ConsoleCommand::Snapshot => {
                self.write_json(out)?;
                return Ok(Flow::Continue);
            }
            ConsoleCommand::Help => {
                writeln!(out, "{HELP}")?;
                return Ok(Flow::Continue);
            }
            ConsoleCommand::Quit => return Ok(Flow::Quit),
        };

        if let Some(Effects { notification, .. }) = &effects {
            writeln!(out, "{}", render::notification(notification))?;
        }
        self.redraw(out)?;
        Ok(Flow::Continue)
    }

    pub fn redraw(&self, out: &mut impl Write) -> io::Result<()> {
        if self.json {
            return self.write_json(out);
        }
        let screen = render::screen(&self.controller.view(&self.config));
        write!(out, "{screen}")
    }

    fn write_json(&self, out: &mut impl Write) -> io::Result<()> {
        let view = self.controller.view(&self.config);
        serde_json::to_writer(&mut *out, &view)?;
        writeln!(out)
    }
}
