//! Line-oriented driver tying commands to a session

use super::commands::Command;
use super::render;
use crate::error::{Result, StockError};
use crate::session::{SessionController, SessionState};
use crate::source::MarketDataSource;

/// Outcome of one line of input
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    Exit,
}

/// One interactive comparison session
pub struct CompareRepl<S> {
    controller: SessionController<S>,
    state: SessionState,
}

impl<S: MarketDataSource> CompareRepl<S> {
    pub fn new(controller: SessionController<S>, state: SessionState) -> Self {
        Self { controller, state }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Prompt for the current view
    pub fn prompt(&self) -> String {
        render::prompt(&self.state)
    }

    /// Text shown when the session starts
    pub fn welcome(&self) -> String {
        let mut out = format!(
            "Current inputs:\n{}\n",
            render::inputs_table(self.state.inputs())
        );
        if !self.controller.can_summarize() {
            out.push_str("Summaries are disabled (OPENAI_API_KEY not set).\n");
        }
        out.push_str("Type /help for commands, /submit to compare.");
        out
    }

    /// Process user input
    pub async fn process_input(&mut self, input: &str) -> Result<Reply> {
        let command = Command::parse(input)?;
        self.execute_command(command).await
    }

    /// Execute a parsed command
    pub async fn execute_command(&mut self, command: Command) -> Result<Reply> {
        let controller = &self.controller;
        let state = &mut self.state;

        let text = match command {
            Command::First { symbol } => {
                controller.set_first_symbol(state, &symbol)?;
                format!("First symbol: {}", state.inputs().first_symbol)
            }
            Command::Second { symbol } => {
                controller.set_second_symbol(state, &symbol)?;
                format!("Second symbol: {}", state.inputs().second_symbol)
            }
            Command::Start { date } => {
                controller.set_start(state, date)?;
                format!("Start date: {date}")
            }
            Command::End { date } => {
                controller.set_end(state, date)?;
                format!("End date: {date}")
            }
            Command::Chart { kind } => {
                controller.set_chart_kind(state, kind)?;
                format!("Chart type: {kind}")
            }
            Command::Inputs => render::inputs_table(state.inputs()).to_string(),
            Command::Submit => {
                // a failed load still lands on the results view
                if let Err(e @ StockError::InvalidState(_)) = controller.submit(state).await {
                    return Err(e);
                }
                render::render_results(state)
            }
            Command::Back => {
                controller.go_back(state)?;
                format!(
                    "Back to inputs.\n{}",
                    render::inputs_table(state.inputs())
                )
            }
            Command::Summary => controller.generate_summary(state).await?,
            Command::Help => Command::help_text().to_string(),
            Command::Exit => return Ok(Reply::Exit),
        };

        Ok(Reply::Text(text))
    }
}
