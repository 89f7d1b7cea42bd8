//! Rendering and document source tests

#[cfg(test)]
mod snapshot_tests {
    use crate::{FileDocumentSource, render_highlights, render_session_view, render_view};
    use insta::assert_snapshot;
    use jdq_core::{
        BiasIssue, BiasType, ClarityDetails, CompletenessDetails, DimensionDetails, DimensionReport,
        DocumentSource, Error, InclusivityDetails, Language, PresentationContext, QualityConfig,
        ReadabilityDetails, Severity, Theme, aggregate, map_highlights, present,
    };
    use jdq_session::{RequestSequencer, SessionState, session_view};
    use std::io::Write;

    fn no_color() {
        colored::control::set_override(false);
    }

    fn reports() -> Vec<DimensionReport> {
        vec![
            DimensionReport::new(
                58.0,
                DimensionDetails::Readability(ReadabilityDetails {
                    recommendations: vec!["Shorten long sentences".to_string()],
                    ..Default::default()
                }),
            ),
            DimensionReport::new(
                70.0,
                DimensionDetails::Completeness(CompletenessDetails {
                    recommendations: vec!["Add a Working Conditions section".to_string()],
                    ..Default::default()
                }),
            ),
            DimensionReport::new(81.0, DimensionDetails::Clarity(ClarityDetails::default())),
            DimensionReport::new(
                52.0,
                DimensionDetails::Inclusivity(InclusivityDetails {
                    recommendations: vec!["Replace chairman with chair".to_string()],
                    ..Default::default()
                }),
            ),
        ]
    }

    #[test]
    fn test_render_dashboard() {
        no_color();
        let assessment = aggregate(&reports(), &QualityConfig::default()).unwrap();
        let view = present(Some(&assessment), &PresentationContext::default());

        assert_snapshot!(render_view(&view, &PresentationContext::default(), 10), @r"
        59/100 Needs Improvement

        📖 Readability    ██████░░░░  58
        📋 Completeness   ███████░░░  70
        🔍 Clarity        ████████░░  81
        🤝 Inclusivity    █████░░░░░  52
        ⚖️ Compliance     ░░░░░░░░░░ n/a

        ⚠ Incomplete analysis: some dimensions could not be computed

        Improvement priority
          1. Inclusivity (52)
          2. Readability (58)
          3. Completeness (70)

        Recommendations
          • Replace chairman with chair
          • Shorten long sentences
          • Add a Working Conditions section
        ");
    }

    #[test]
    fn test_render_no_data() {
        no_color();
        let view = present(None, &PresentationContext::default());
        assert_eq!(render_view(&view, &PresentationContext::default(), 10), "No analysis available yet\n");
    }

    #[test]
    fn test_render_highlights() {
        no_color();
        let text = "The chairman seeks a young rockstar.";
        let issues = vec![
            BiasIssue {
                bias_type: BiasType::GenderCodedMasculine,
                severity: Severity::Medium,
                problematic_text: "rockstar".to_string(),
                explanation: String::new(),
                suggested_alternatives: vec!["expert".to_string()],
                start_index: 27,
                end_index: 35,
            },
            BiasIssue {
                bias_type: BiasType::Gender,
                severity: Severity::High,
                problematic_text: "chairman".to_string(),
                explanation: String::new(),
                suggested_alternatives: vec!["chair".to_string(), "chairperson".to_string()],
                start_index: 4,
                end_index: 12,
            },
            BiasIssue {
                bias_type: BiasType::Age,
                severity: Severity::High,
                problematic_text: "young".to_string(),
                explanation: String::new(),
                suggested_alternatives: Vec::new(),
                start_index: 21,
                end_index: 99,
            },
        ];
        let report = map_highlights(&issues, text.chars().count());

        assert_snapshot!(render_highlights(text, &report, &PresentationContext::default()), @r"
        The chairman seeks a young rockstar.

        Flagged language
          [high] chairman (gender) -> chair, chairperson
          [medium] rockstar (gender-coded-masculine) -> expert
          1 issue(s) could not be located in the text
        ");
    }

    #[test]
    fn test_render_failed_session() {
        no_color();
        let sequencer = RequestSequencer::new();
        let state = SessionState::Failed {
            request: sequencer.next(),
            error: "Analysis failed: clarity: Network error: connection refused".to_string(),
        };
        let view = session_view(&state, &PresentationContext::default());

        assert_snapshot!(render_session_view(&view, "", &PresentationContext::default(), true, 10), @r"
        ❌ The analysis could not be completed. Try again. #1
          Analysis failed: clarity: Network error: connection refused
          Save the file again to retry
        ");
    }

    #[test]
    fn test_render_in_french() {
        no_color();
        let ctx = PresentationContext::new(Language::Fr, Theme::Light);
        let assessment = aggregate(&reports(), &QualityConfig::default()).unwrap();
        let rendered = render_view(&present(Some(&assessment), &ctx), &ctx, 10);
        assert!(rendered.contains("Priorités d'amélioration"));
        assert!(rendered.contains("Recommandations"));
        assert!(!rendered.contains("Recommendations"));

        let state = SessionState::Failed {
            request: RequestSequencer::new().next(),
            error: "Timeout error: no answer".to_string(),
        };
        let failed = render_session_view(&session_view(&state, &ctx), "", &ctx, true, 10);
        assert!(failed.contains("Enregistrez de nouveau le fichier pour réessayer"));

        let issue = BiasIssue {
            bias_type: BiasType::Age,
            severity: Severity::High,
            problematic_text: "jeune".to_string(),
            explanation: String::new(),
            suggested_alternatives: Vec::new(),
            start_index: 0,
            end_index: 80,
        };
        let highlights = render_highlights("Un jeune", &map_highlights(&[issue], 8), &ctx);
        assert!(highlights.contains("1 problème(s) introuvable(s) dans le texte"));
    }

    #[tokio::test]
    async fn test_file_source_loads_markdown() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "# Policy Analyst\n\n## Summary\nLeads policy research.\n\n## Key Activities\n- Writes briefing notes\n"
        )
        .unwrap();

        let source = FileDocumentSource::new(file.path());
        let document = source.load().await.unwrap();

        assert_eq!(document.title.as_deref(), Some("Policy Analyst"));
        let headings: Vec<_> = document.sections.iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(headings, vec!["Summary", "Key Activities"]);
        assert!(document.text.starts_with("# Policy Analyst"));
        assert!(source.modified().await.is_ok());
        assert_eq!(source.describe(), file.path().display().to_string());
    }

    #[tokio::test]
    async fn test_file_source_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = FileDocumentSource::new(dir.path().join("missing.md"));
        assert!(matches!(missing.load().await, Err(Error::Io(_))));

        let binary_path = dir.path().join("binary.md");
        std::fs::write(&binary_path, [0xff, 0xfe, 0x00]).unwrap();
        let binary = FileDocumentSource::new(&binary_path);
        assert!(matches!(binary.load().await, Err(Error::Other(_))));
    }
}
