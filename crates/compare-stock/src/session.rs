//! Interaction state and the actions that drive it
//!
//! A [`SessionState`] belongs to exactly one interaction and is passed by
//! mutable reference into each [`SessionController`] action. The controller
//! itself holds only the collaborators (data source, summarizer), so one
//! controller can serve any number of independent sessions.
//!
//! ```text
//!            submit
//!   Input ───────────▶ Results ──┐
//!     ▲                          │ (fetch failed: error sub-state,
//!     └────────── go back ───────┘  no series loaded)
//! ```

use crate::align::{CombinedSeries, align};
use crate::chart::ChartKind;
use crate::config::CompareConfig;
use crate::error::{Result, StockError};
use crate::series::{DateRange, PriceSeries, Symbol};
use crate::source::MarketDataSource;
use crate::summarizer::Summarizer;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, instrument, warn};

/// Which view the session is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum View {
    Input,
    Results,
}

/// What the user has entered on the input view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionInputs {
    pub first_symbol: Symbol,
    pub second_symbol: Symbol,
    pub range: DateRange,
    pub chart_kind: ChartKind,
}

/// Everything needed to render the results view
#[derive(Debug, Clone, Copy)]
pub struct LoadedData<'a> {
    pub first: &'a PriceSeries,
    pub second: &'a PriceSeries,
    pub combined: &'a CombinedSeries,
}

/// Per-interaction state
#[derive(Debug, Clone, Serialize)]
pub struct SessionState {
    inputs: SessionInputs,
    view: View,
    first_series: Option<PriceSeries>,
    second_series: Option<PriceSeries>,
    combined: Option<CombinedSeries>,
    summary: Option<String>,
    last_error: Option<String>,
}

impl SessionState {
    /// Fresh session on the input view, nothing fetched yet
    pub fn new(inputs: SessionInputs) -> Self {
        Self {
            inputs,
            view: View::Input,
            first_series: None,
            second_series: None,
            combined: None,
            summary: None,
            last_error: None,
        }
    }

    /// Fresh session pre-filled from the configured defaults
    pub fn with_defaults(config: &CompareConfig, today: NaiveDate) -> Result<Self> {
        let (first, second) = &config.default_symbols;
        Ok(Self::new(SessionInputs {
            first_symbol: Symbol::parse(first)?,
            second_symbol: Symbol::parse(second)?,
            range: DateRange::trailing(today, config.default_lookback_days),
            chart_kind: config.default_chart,
        }))
    }

    pub fn inputs(&self) -> &SessionInputs {
        &self.inputs
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// The submitted flag
    pub fn is_submitted(&self) -> bool {
        self.view == View::Results
    }

    pub fn first_series(&self) -> Option<&PriceSeries> {
        self.first_series.as_ref()
    }

    pub fn second_series(&self) -> Option<&PriceSeries> {
        self.second_series.as_ref()
    }

    pub fn combined(&self) -> Option<&CombinedSeries> {
        self.combined.as_ref()
    }

    /// Latest generated summary
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Message for the most recent failed submit
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Both series and the combined table, when all three are present
    pub fn loaded(&self) -> Option<LoadedData<'_>> {
        Some(LoadedData {
            first: self.first_series.as_ref()?,
            second: self.second_series.as_ref()?,
            combined: self.combined.as_ref()?,
        })
    }

    fn require_view(&self, view: View, action: &str) -> Result<()> {
        if self.view == view {
            Ok(())
        } else {
            let hint = match view {
                View::Input => "go back first",
                View::Results => "submit first",
            };
            Err(StockError::InvalidState(format!(
                "Cannot {action} on the {:?} view; {hint}",
                self.view
            )))
        }
    }

    fn clear_data(&mut self) {
        self.first_series = None;
        self.second_series = None;
        self.combined = None;
    }
}

/// Runs session actions against a market data source and an optional
/// summarizer
pub struct SessionController<S> {
    source: S,
    summarizer: Option<Summarizer>,
}

impl<S: MarketDataSource> SessionController<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            summarizer: None,
        }
    }

    /// Enable the summary action
    pub fn with_summarizer(mut self, summarizer: Summarizer) -> Self {
        self.summarizer = Some(summarizer);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn can_summarize(&self) -> bool {
        self.summarizer.is_some()
    }

    pub fn set_first_symbol(&self, state: &mut SessionState, input: &str) -> Result<()> {
        state.require_view(View::Input, "change symbols")?;
        state.inputs.first_symbol = Symbol::parse(input)?;
        Ok(())
    }

    pub fn set_second_symbol(&self, state: &mut SessionState, input: &str) -> Result<()> {
        state.require_view(View::Input, "change symbols")?;
        state.inputs.second_symbol = Symbol::parse(input)?;
        Ok(())
    }

    pub fn set_start(&self, state: &mut SessionState, start: NaiveDate) -> Result<()> {
        state.require_view(View::Input, "change dates")?;
        state.inputs.range.start = start;
        Ok(())
    }

    pub fn set_end(&self, state: &mut SessionState, end: NaiveDate) -> Result<()> {
        state.require_view(View::Input, "change dates")?;
        state.inputs.range.end = end;
        Ok(())
    }

    pub fn set_chart_kind(&self, state: &mut SessionState, kind: ChartKind) -> Result<()> {
        state.require_view(View::Input, "change the chart type")?;
        state.inputs.chart_kind = kind;
        Ok(())
    }

    /// Input → Results: fetch both symbols and align them
    ///
    /// The view moves to Results even when loading fails; in that case no
    /// series is kept and the error is recorded on the state as well as
    /// returned.
    #[instrument(skip_all, fields(
        first = %state.inputs.first_symbol,
        second = %state.inputs.second_symbol,
        range = %state.inputs.range,
    ))]
    pub async fn submit(&self, state: &mut SessionState) -> Result<()> {
        state.require_view(View::Input, "submit")?;

        state.view = View::Results;
        state.summary = None;
        state.last_error = None;
        state.clear_data();

        match self.load(&state.inputs).await {
            Ok((first, second, combined)) => {
                info!(rows = combined.len(), "Comparison loaded");
                state.first_series = Some(first);
                state.second_series = Some(second);
                state.combined = Some(combined);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Comparison failed to load");
                state.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    async fn load(
        &self,
        inputs: &SessionInputs,
    ) -> Result<(PriceSeries, PriceSeries, CombinedSeries)> {
        inputs.range.validate()?;

        let (first, second) = tokio::join!(
            self.source.fetch(&inputs.first_symbol, &inputs.range),
            self.source.fetch(&inputs.second_symbol, &inputs.range),
        );
        let (first, second) = (first?, second?);

        let combined = align(&first, &inputs.first_symbol, &second, &inputs.second_symbol);
        Ok((first, second, combined))
    }

    /// Results → Input; fetched data stays in place
    pub fn go_back(&self, state: &mut SessionState) -> Result<()> {
        state.require_view(View::Results, "go back")?;
        state.view = View::Input;
        info!("Returned to input view");
        Ok(())
    }

    /// Ask for a fresh comparative summary of the loaded series
    ///
    /// On success the text replaces any earlier summary. On failure the
    /// loaded data and the earlier summary are left untouched.
    pub async fn generate_summary(&self, state: &mut SessionState) -> Result<String> {
        state.require_view(View::Results, "generate a summary")?;

        let summarizer = self.summarizer.as_ref().ok_or_else(|| {
            StockError::ConfigError(
                "summaries are unavailable: OPENAI_API_KEY is not set".to_string(),
            )
        })?;

        let data = state.loaded().ok_or_else(|| {
            StockError::InvalidState("No comparison data loaded; go back and resubmit".to_string())
        })?;

        let summary = summarizer
            .summarize(
                &state.inputs.first_symbol,
                data.first,
                &state.inputs.second_symbol,
                data.second,
            )
            .await
            .inspect_err(|e| warn!(error = %e, "Summary generation failed"))?;

        state.summary = Some(summary.clone());
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::Side;
    use crate::series::test_support::{date, series};
    use crate::source::MockMarketDataSource;
    use crate::summarizer::test_support::ScriptedProvider;
    use compare_llm::LLMError;
    use std::sync::Arc;

    fn inputs() -> SessionInputs {
        SessionInputs {
            first_symbol: Symbol::parse("AAPL").unwrap(),
            second_symbol: Symbol::parse("GOOGL").unwrap(),
            range: DateRange::new(date(1), date(10)),
            chart_kind: ChartKind::Line,
        }
    }

    fn fake_fetch(symbol: &Symbol, _range: &DateRange) -> Result<PriceSeries> {
        match symbol.as_str() {
            "AAPL" => Ok(series("AAPL", &[(1, 10.0), (2, 11.0), (3, 12.0)])),
            "GOOGL" => Ok(series("GOOGL", &[(2, 20.0), (3, 21.0), (4, 22.0)])),
            other => Err(StockError::DataUnavailable {
                symbol: other.to_string(),
                reason: "unknown symbol".to_string(),
            }),
        }
    }

    fn source(times: usize) -> MockMarketDataSource {
        let mut source = MockMarketDataSource::new();
        source.expect_fetch().times(times).returning(fake_fetch);
        source
    }

    #[test]
    fn test_new_session_starts_on_input() {
        let state = SessionState::new(inputs());
        assert_eq!(state.view(), View::Input);
        assert!(!state.is_submitted());
        assert!(state.loaded().is_none());
    }

    #[test]
    fn test_defaults_from_config() {
        let state = SessionState::with_defaults(&CompareConfig::default(), date(15)).unwrap();
        assert_eq!(state.inputs().first_symbol.as_str(), "AAPL");
        assert_eq!(state.inputs().second_symbol.as_str(), "GOOGL");
        assert_eq!(state.inputs().range, DateRange::new(date(8), date(15)));
        assert_eq!(state.inputs().chart_kind, ChartKind::Line);
    }

    #[tokio::test]
    async fn test_submit_loads_and_aligns() {
        let controller = SessionController::new(source(2));
        let mut state = SessionState::new(inputs());

        controller.submit(&mut state).await.unwrap();

        assert_eq!(state.view(), View::Results);
        let data = state.loaded().unwrap();
        assert_eq!(data.first.len(), 3);
        assert_eq!(data.second.len(), 3);
        assert_eq!(
            data.combined.dates().collect::<Vec<_>>(),
            vec![date(1), date(2), date(3), date(4)]
        );
        assert_eq!(
            data.combined.column(Side::First),
            vec![Some(10.0), Some(11.0), Some(12.0), None]
        );
        assert_eq!(
            data.combined.column(Side::Second),
            vec![None, Some(20.0), Some(21.0), Some(22.0)]
        );
        assert!(state.last_error().is_none());
    }

    #[tokio::test]
    async fn test_fetch_failure_leaves_combined_unset() {
        let controller = SessionController::new(source(2));
        let mut state = SessionState::new(inputs());
        controller.set_second_symbol(&mut state, "nope").unwrap();

        let err = controller.submit(&mut state).await.unwrap_err();

        assert!(err.is_fetch_error());
        assert_eq!(state.view(), View::Results);
        assert!(state.first_series().is_none());
        assert!(state.second_series().is_none());
        assert!(state.combined().is_none());
        assert!(state.last_error().unwrap().contains("NOPE"));
    }

    #[tokio::test]
    async fn test_inverted_range_is_rejected_without_fetching() {
        let mut mock = MockMarketDataSource::new();
        mock.expect_fetch().never();
        let controller = SessionController::new(mock);
        let mut state = SessionState::new(inputs());
        controller.set_start(&mut state, date(20)).unwrap();

        let err = controller.submit(&mut state).await.unwrap_err();

        assert!(matches!(err, StockError::InvalidRange { .. }));
        assert_eq!(state.view(), View::Results);
        assert!(state.loaded().is_none());
    }

    #[tokio::test]
    async fn test_go_back_keeps_data() {
        let controller = SessionController::new(source(2));
        let mut state = SessionState::new(inputs());
        controller.submit(&mut state).await.unwrap();

        controller.go_back(&mut state).unwrap();

        assert_eq!(state.view(), View::Input);
        assert!(state.loaded().is_some());
        assert_eq!(state.combined().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_resubmit_fetches_again() {
        let controller = SessionController::new(source(4));
        let mut state = SessionState::new(inputs());

        controller.submit(&mut state).await.unwrap();
        controller.go_back(&mut state).unwrap();
        controller.submit(&mut state).await.unwrap();

        assert!(state.loaded().is_some());
    }

    #[tokio::test]
    async fn test_failed_resubmit_clears_previous_data() {
        let controller = SessionController::new(source(4));
        let mut state = SessionState::new(inputs());
        controller.submit(&mut state).await.unwrap();
        controller.go_back(&mut state).unwrap();
        controller.set_first_symbol(&mut state, "zzzz").unwrap();

        assert!(controller.submit(&mut state).await.is_err());
        assert!(state.loaded().is_none());

        // error sub-state only leads back to Input
        assert!(matches!(
            controller.submit(&mut state).await,
            Err(StockError::InvalidState(_))
        ));
        controller.go_back(&mut state).unwrap();
        assert_eq!(state.view(), View::Input);
    }

    #[tokio::test]
    async fn test_inputs_locked_on_results_view() {
        let controller = SessionController::new(source(2));
        let mut state = SessionState::new(inputs());
        controller.submit(&mut state).await.unwrap();

        assert!(controller.set_first_symbol(&mut state, "MSFT").is_err());
        assert!(controller.set_end(&mut state, date(5)).is_err());
        assert!(controller.set_chart_kind(&mut state, ChartKind::Bar).is_err());
        assert_eq!(state.inputs().first_symbol.as_str(), "AAPL");
    }

    #[tokio::test]
    async fn test_go_back_from_input_is_rejected() {
        let controller = SessionController::new(source(0));
        let mut state = SessionState::new(inputs());
        assert!(matches!(
            controller.go_back(&mut state),
            Err(StockError::InvalidState(_))
        ));
    }

    #[tokio::test]
    async fn test_same_symbol_twice_is_allowed() {
        let controller = SessionController::new(source(2));
        let mut state = SessionState::new(inputs());
        controller.set_second_symbol(&mut state, "aapl").unwrap();

        controller.submit(&mut state).await.unwrap();

        let combined = state.combined().unwrap();
        assert_eq!(combined.len(), 3);
        assert_eq!(combined.column(Side::First), combined.column(Side::Second));
    }

    #[tokio::test]
    async fn test_summary_requires_results_with_data() {
        let controller = SessionController::new(source(0))
            .with_summarizer(Summarizer::new(Arc::new(ScriptedProvider::text("x")), "m"));
        let mut state = SessionState::new(inputs());

        assert!(matches!(
            controller.generate_summary(&mut state).await,
            Err(StockError::InvalidState(_))
        ));
    }

    #[tokio::test]
    async fn test_summary_without_api_key() {
        let controller = SessionController::new(source(2));
        let mut state = SessionState::new(inputs());
        controller.submit(&mut state).await.unwrap();

        let err = controller.generate_summary(&mut state).await.unwrap_err();

        assert!(matches!(err, StockError::ConfigError(_)));
        assert!(state.loaded().is_some());
    }

    #[tokio::test]
    async fn test_summary_is_stored_and_cleared_on_submit() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Ok(Some("AAPL trailed GOOGL.".to_string())),
        ]));
        let controller = SessionController::new(source(4))
            .with_summarizer(Summarizer::new(provider, "gpt-3.5-turbo"));
        let mut state = SessionState::new(inputs());
        controller.submit(&mut state).await.unwrap();

        let summary = controller.generate_summary(&mut state).await.unwrap();
        assert_eq!(summary, "AAPL trailed GOOGL.");
        assert_eq!(state.summary(), Some("AAPL trailed GOOGL."));

        controller.go_back(&mut state).unwrap();
        assert_eq!(state.summary(), Some("AAPL trailed GOOGL."));
        controller.submit(&mut state).await.unwrap();
        assert_eq!(state.summary(), None);
    }

    #[tokio::test]
    async fn test_summary_failure_keeps_data() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Ok(Some("first".to_string())),
            Err(LLMError::RequestFailed("timeout".to_string())),
        ]));
        let controller = SessionController::new(source(2))
            .with_summarizer(Summarizer::new(provider, "gpt-3.5-turbo"));
        let mut state = SessionState::new(inputs());
        controller.submit(&mut state).await.unwrap();
        controller.generate_summary(&mut state).await.unwrap();

        let err = controller.generate_summary(&mut state).await.unwrap_err();

        assert!(matches!(err, StockError::Summarization(_)));
        assert!(state.loaded().is_some());
        assert_eq!(state.summary(), Some("first"));
    }
}
