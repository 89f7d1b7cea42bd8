//! Snapshot tests for the heuristic analyzers

#[cfg(test)]
mod snapshot_tests {
    use crate::HeuristicAnalyzer;
    use insta::assert_yaml_snapshot;
    use jdq_core::{
        AnalysisRequest, Dimension, DimensionAnalyzer, DimensionDetails, Language, QualityConfig,
        aggregate, map_highlights,
    };

    const POSTING: &str = "## Summary\nThe chairman needs a young, energetic analyst who is a native English speaker.\n";

    fn analyze_all(request: &AnalysisRequest) -> Vec<jdq_core::DimensionReport> {
        let analyzer = HeuristicAnalyzer::new(&QualityConfig::default()).unwrap();
        Dimension::ALL
            .iter()
            .map(|d| tokio_test::block_on(analyzer.analyze(*d, request)).unwrap())
            .collect()
    }

    #[test]
    fn test_highlights_from_heuristic_scan() {
        let request = AnalysisRequest::new(POSTING, Language::En);
        let reports = analyze_all(&request);
        let assessment = aggregate(&reports, &QualityConfig::default()).unwrap();
        let highlights = map_highlights(assessment.bias_issues(), request.char_len());

        let spans: Vec<String> = highlights
            .spans
            .iter()
            .map(|s| format!("{}..{} {} {:?}", s.start, s.end, s.issue.problematic_text, s.color))
            .collect();

        assert_eq!(highlights.dropped, 0);
        assert_yaml_snapshot!(spans, @r"
        - 15..23 chairman Red
        - 32..37 young Red
        - 39..48 energetic Orange
        - 66..88 native English speaker DeepRed
        ");
    }

    #[test]
    fn test_completeness_and_compliance_findings() {
        let request = AnalysisRequest::new(POSTING, Language::En);
        let reports = analyze_all(&request);

        let completeness = reports
            .iter()
            .find(|r| r.dimension == Dimension::Completeness)
            .unwrap();
        let DimensionDetails::Completeness(details) = &completeness.details else {
            panic!("wrong details for completeness");
        };
        assert_yaml_snapshot!(details.missing_sections, @r"
        - Key Activities
        - Qualifications
        - Working Conditions
        - Language and Security Requirements
        ");
        assert_eq!(details.thin_sections, vec!["Summary"]);

        let compliance = reports
            .iter()
            .find(|r| r.dimension == Dimension::Compliance)
            .unwrap();
        assert_eq!(compliance.score, 0.0);
        assert_eq!(compliance.details.recommendations().len(), 5);
    }

    #[test]
    fn test_issue_offsets_index_the_analyzed_text() {
        let text = "Résumé du poste:\nLe chairman recherche un candidat young et able-bodied.\n\
                    Our culture fit matters; he must be able to stand all day.";
        let request = AnalysisRequest::new(text, Language::Fr);
        let analyzer = HeuristicAnalyzer::new(&QualityConfig::default()).unwrap();
        let report = tokio_test::block_on(analyzer.analyze(Dimension::Inclusivity, &request)).unwrap();

        let chars: Vec<char> = request.text.chars().collect();
        let issues = report.details.bias_issues();
        assert_eq!(issues.len(), 6);
        for issue in issues {
            assert!(issue.start_index >= 0);
            assert!(issue.start_index < issue.end_index);
            assert!(issue.end_index as usize <= chars.len());
            let slice: String = chars[issue.start_index as usize..issue.end_index as usize]
                .iter()
                .collect();
            assert_eq!(slice, issue.problematic_text);
        }
    }

    #[test]
    fn test_complete_posting_scores_well() {
        let posting = "\
# Policy Analyst

## Summary
You will lead research on housing policy for the department. You will write briefing notes for senior managers. You will work with partners across the country to improve programs.

## Key Activities
- Plan and carry out research projects on housing needs and program results.
- Write clear briefing notes, reports and presentations for managers.
- Meet with partners and stakeholders to gather their views.
- Track progress on files and report on results each month.

## Qualifications
You have a degree in public policy, economics or a related field. You have two years of experience doing policy research. You write clearly and you work well with others on a team.

## Working Conditions
You work in an office with a flexible hybrid schedule. You sometimes travel to meet partners. Deadlines can be tight during budget season, and you may work some overtime.

## Language and Security Requirements
This position is bilingual imperative. Reliability status security clearance is required. Classification EC-05, salary from $80,000.

We are committed to employment equity. Accommodation is available on request at every stage of the selection process.
";
        let request = AnalysisRequest::new(posting, Language::En);
        let reports = analyze_all(&request);
        let assessment = aggregate(&reports, &QualityConfig::default()).unwrap();

        assert!(!assessment.is_incomplete());
        assert!(assessment.bias_issues().is_empty());
        assert_eq!(assessment.score(Dimension::Inclusivity).unwrap().score, 100.0);
        assert_eq!(assessment.score(Dimension::Compliance).unwrap().score, 100.0);
        assert_eq!(assessment.score(Dimension::Completeness).unwrap().score, 100.0);
        assert!(assessment.overall_score >= 75.0, "overall {}", assessment.overall_score);
    }
}
