//! Session behavior tests on a paused clock

#[cfg(test)]
mod snapshot_tests {
    use crate::{AnalysisSession, AutoAnalyzer, RequestSequencer, SessionState, SessionView, session_view};
    use async_trait::async_trait;
    use insta::assert_yaml_snapshot;
    use jdq_core::{
        AnalysisRequest, BiasIssue, BiasType, Dimension, DimensionAnalyzer, DimensionDetails,
        DimensionReport, Error, InclusivityDetails, Language, PresentationContext, QualityConfig,
        QualityLevel, Result, Severity, Theme, ViewModel,
    };
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Analyzer whose timing and scores depend on the text it is given
    #[derive(Default)]
    struct ScriptedAnalyzer {
        calls: AtomicUsize,
        failing: Vec<Dimension>,
        stalled: Vec<Dimension>,
    }

    impl ScriptedAnalyzer {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DimensionAnalyzer for ScriptedAnalyzer {
        async fn analyze(&self, dimension: Dimension, request: &AnalysisRequest) -> Result<DimensionReport> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            let delay = if self.stalled.contains(&dimension) {
                Duration::from_secs(3600)
            } else if request.text.contains("slow") {
                Duration::from_millis(500)
            } else {
                Duration::from_millis(10)
            };
            tokio::time::sleep(delay).await;

            if self.failing.contains(&dimension) {
                return Err(Error::Analyzer("upstream unavailable".to_string()));
            }

            let score = if request.text.contains("good") { 90.0 } else { 40.0 };
            Ok(DimensionReport::new(score, DimensionDetails::empty(dimension)))
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn request(text: &str) -> AnalysisRequest {
        AnalysisRequest::new(text, Language::En)
    }

    fn session_with(analyzer: ScriptedAnalyzer) -> (AnalysisSession, Arc<ScriptedAnalyzer>) {
        let analyzer = Arc::new(analyzer);
        let session = AnalysisSession::new(analyzer.clone(), QualityConfig::default());
        (session, analyzer)
    }

    #[tokio::test(start_paused = true)]
    async fn test_analysis_reaches_ready() {
        let (session, analyzer) = session_with(ScriptedAnalyzer::default());
        assert_eq!(session.state(), SessionState::Idle);

        let id = session.analyze(request("A good posting.")).await;

        let state = session.state();
        assert_eq!(state.request(), Some(id));
        let outcome = state.outcome().unwrap();
        assert_eq!(outcome.assessment.quality_level, QualityLevel::Excellent);
        assert!(!outcome.assessment.is_incomplete());
        assert_eq!(outcome.text_len, 15);
        assert_eq!(analyzer.calls(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_completion_is_discarded() {
        let (session, _) = session_with(ScriptedAnalyzer::default());

        let first = session.trigger(request("slow draft"));
        tokio::time::sleep(Duration::from_millis(1)).await;
        let second = session.trigger(request("good revision"));

        let second_id = second.await.unwrap();
        assert_eq!(session.state().request(), Some(second_id));

        // The older request answers last but must not overwrite the newer result
        let first_id = first.await.unwrap();
        assert!(first_id < second_id);

        let state = session.state();
        assert_eq!(state.request(), Some(second_id));
        assert_eq!(
            state.outcome().unwrap().assessment.quality_level,
            QualityLevel::Excellent
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_timed_out_dimension_is_missing() {
        let (session, _) = session_with(ScriptedAnalyzer {
            stalled: vec![Dimension::Compliance],
            ..Default::default()
        });

        session.analyze(request("A good posting.")).await;

        let state = session.state();
        let assessment = &state.outcome().unwrap().assessment;
        assert_eq!(assessment.missing_dimensions, vec![Dimension::Compliance]);

        let ctx = PresentationContext::default();
        let SessionView::Ready { view: ViewModel::Dashboard(dashboard), .. } = session_view(&state, &ctx) else {
            panic!("expected a dashboard");
        };
        assert!(dashboard.incomplete);
        assert!(dashboard.notice.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_dimensions_failing_ends_failed() {
        let (session, analyzer) = session_with(ScriptedAnalyzer {
            failing: Dimension::ALL.to_vec(),
            ..Default::default()
        });

        let id = session.analyze(request("A good posting.")).await;
        let SessionState::Failed { request, error } = session.state() else {
            panic!("expected failure");
        };
        assert_eq!(request, id);
        assert!(error.contains("upstream unavailable"));

        let retried = session.retry().await.unwrap();
        assert!(retried > id);
        assert!(matches!(session.state(), SessionState::Failed { .. }));
        assert_eq!(analyzer.calls(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_without_history() {
        let (session, _) = session_with(ScriptedAnalyzer::default());
        assert!(session.retry().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_coalesces_edits() {
        let (session, analyzer) = session_with(ScriptedAnalyzer::default());
        let mut rx = session.subscribe();
        let mut auto = AutoAnalyzer::new(session.clone(), Language::En);

        auto.on_edit("Dr");
        tokio::time::sleep(Duration::from_millis(300)).await;
        auto.on_edit("Draft");
        tokio::time::sleep(Duration::from_millis(300)).await;
        auto.on_edit("Draft posting");
        assert!(auto.is_pending());
        assert_eq!(session.latest_request(), None);

        rx.wait_for(|s| s.is_settled()).await.unwrap();
        assert_eq!(analyzer.calls(), 5);
        assert_eq!(session.latest_request().map(|id| id.value()), Some(1));
        assert_eq!(session.state().outcome().unwrap().text_len, 13);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unchanged_text_is_not_reanalyzed() {
        let (session, analyzer) = session_with(ScriptedAnalyzer::default());
        let mut rx = session.subscribe();
        let mut auto = AutoAnalyzer::new(session.clone(), Language::En)
            .with_debounce(Duration::from_millis(200));

        auto.on_edit("Same text");
        rx.wait_for(|s| s.is_settled()).await.unwrap();
        assert_eq!(analyzer.calls(), 5);

        auto.on_edit("Same text");
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(analyzer.calls(), 5);
        assert_eq!(session.latest_request().map(|id| id.value()), Some(1));

        auto.on_edit("Changed text");
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(analyzer.calls(), 10);
        assert_eq!(session.latest_request().map(|id| id.value()), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unchanged_edit_after_failure_is_reanalyzed() {
        let (session, analyzer) = session_with(ScriptedAnalyzer {
            failing: Dimension::ALL.to_vec(),
            ..Default::default()
        });
        let mut rx = session.subscribe();
        let mut auto = AutoAnalyzer::new(session.clone(), Language::En)
            .with_debounce(Duration::from_millis(200));

        auto.on_edit("Same posting");
        rx.wait_for(|s| s.is_settled()).await.unwrap();
        assert!(matches!(session.state(), SessionState::Failed { .. }));
        assert_eq!(analyzer.calls(), 5);

        auto.on_edit("Same posting");
        rx.wait_for(|s| s.is_analyzing()).await.unwrap();
        assert_eq!(session.latest_request().map(|id| id.value()), Some(2));

        rx.wait_for(|s| s.is_settled()).await.unwrap();
        assert_eq!(analyzer.calls(), 10);
        let SessionState::Failed { request, .. } = session.state() else {
            panic!("expected failure");
        };
        assert_eq!(request.value(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ready_session_reanalyzes_on_edit() {
        let (session, analyzer) = session_with(ScriptedAnalyzer::default());
        let mut rx = session.subscribe();
        let mut auto = AutoAnalyzer::new(session.clone(), Language::En)
            .with_debounce(Duration::from_millis(200));

        auto.on_edit("Draft posting");
        rx.wait_for(|s| s.is_settled()).await.unwrap();
        assert_eq!(session.state().outcome().unwrap().assessment.quality_level, QualityLevel::NeedsImprovement);

        auto.on_edit("A good posting");
        rx.wait_for(|s| s.is_analyzing()).await.unwrap();
        rx.wait_for(|s| s.is_settled()).await.unwrap();
        assert_eq!(analyzer.calls(), 10);
        assert_eq!(session.state().outcome().unwrap().assessment.quality_level, QualityLevel::Excellent);
    }

    /// Reports one usable issue, one with offsets past the text and a count
    /// of issues that could not be read at all
    struct FlaggingAnalyzer;

    #[async_trait]
    impl DimensionAnalyzer for FlaggingAnalyzer {
        async fn analyze(&self, dimension: Dimension, _request: &AnalysisRequest) -> Result<DimensionReport> {
            let details = match dimension {
                Dimension::Inclusivity => {
                    let issue = |start, end| BiasIssue {
                        bias_type: BiasType::Gender,
                        severity: Severity::High,
                        problematic_text: "chairman".to_string(),
                        explanation: String::new(),
                        suggested_alternatives: vec!["chair".to_string()],
                        start_index: start,
                        end_index: end,
                    };
                    DimensionDetails::Inclusivity(InclusivityDetails {
                        issues: vec![issue(4, 12), issue(40, 48)],
                        rejected_issues: 2,
                        ..Default::default()
                    })
                }
                other => DimensionDetails::empty(other),
            };
            Ok(DimensionReport::new(80.0, details))
        }

        fn name(&self) -> &str {
            "flagging"
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_unreadable_issues_count_as_dropped_highlights() {
        let session = AnalysisSession::new(Arc::new(FlaggingAnalyzer), QualityConfig::default());

        session.analyze(request("The chairman decides.")).await;

        let state = session.state();
        let highlights = &state.outcome().unwrap().highlights;
        assert_eq!(highlights.spans.len(), 1);
        assert_eq!((highlights.spans[0].start, highlights.spans[0].end), (4, 12));
        assert_eq!(highlights.dropped, 3);
    }

    #[test]
    fn test_error_and_loading_views() {
        let sequencer = RequestSequencer::new();
        let ctx = PresentationContext::new(Language::En, Theme::Dark);

        let loading = SessionState::Analyzing { request: sequencer.next() };
        assert_yaml_snapshot!(session_view(&loading, &ctx), @r"
        status: loading
        request: 1
        message: Analyzing content quality...
        ");

        let failed = SessionState::Failed {
            request: sequencer.next(),
            error: "upstream unavailable".to_string(),
        };
        assert_yaml_snapshot!(session_view(&failed, &ctx), @r"
        status: error
        request: 2
        message: The analysis could not be completed. Try again.
        detail: upstream unavailable
        can_retry: true
        ");

        assert_yaml_snapshot!(session_view(&SessionState::Idle, &ctx), @r"
        status: empty
        view:
          view: no_data
          message: No analysis available yet
        ");
    }
}
