use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub job_id: i64,
    pub job_title: String,
    pub comp_name: Option<String>,
    pub company_logo: Option<String>, // base64 JPEG; terminal render falls back to the initial
    pub created_date: String,
    pub total_applications: Option<i64>,
    pub total_submissions: Option<i64>,
    pub completed_submissions: Option<i64>,
}

// Aggregated per-job report, computed server-side. Every section arrives
// pre-shaped for display; the client derives percentages and labels only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analytics {
    pub overview: Overview,
    #[serde(default)]
    pub timeline: Vec<TimelinePoint>,
    pub video_assessment: VideoAssessment,
    pub resume_analysis: ResumeAnalysis,
    pub mcq_performance: McqPerformance,
    pub case_study: CaseStudy,
    #[serde(default)]
    pub technical_insights: Option<TechnicalInsights>,
    #[serde(default)]
    pub geography: Vec<GeographyPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Overview {
    pub total_applications: i64,
    pub complete_submissions: i64,
    pub incomplete_submissions: i64,
    pub not_started: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub date: String,
    pub applications: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoAssessment {
    pub average_score: f64,
    pub above_ideal: i64,
    #[serde(default)]
    pub emotional_analysis: Vec<EmotionCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionCount {
    pub emotion: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    pub keyword_match: f64,   // 0-100
    pub relevance_score: f64, // 0-100
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McqPerformance {
    pub average_score: f64,
    pub above_ideal: i64,
    #[serde(default)]
    pub difficulty_analysis: Vec<DifficultyLevel>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifficultyLevel {
    pub level: String,
    pub correct: i64,
    pub total: i64,
    #[serde(rename = "successRate")]
    pub success_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseStudy {
    pub average_score: f64,
    pub completion_rate: f64,
    #[serde(default)]
    pub key_insights: Vec<String>,
}

// The server omits this section entirely when no assessment responses exist;
// tab_switching can also be missing on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnicalInsights {
    pub total_responses: i64,
    #[serde(default)]
    pub tab_switching: Option<TabSwitching>,
    pub video_upload_success: i64,
    pub screen_recording_success: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabSwitching {
    pub average: f64,
    pub max: i64,
    pub compliant: i64,
    pub non_compliant: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeographyPoint {
    pub home_address: String,
    pub candidate_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "overview": {
            "total_applications": 100,
            "complete_submissions": 40,
            "incomplete_submissions": 35,
            "not_started": 25
        },
        "timeline": [
            {"date": "2024-09-01", "applications": 12},
            {"date": "2024-09-02", "applications": 7}
        ],
        "video_assessment": {
            "average_score": 6.4,
            "above_ideal": 18,
            "emotional_analysis": [
                {"emotion": "happy", "count": 30},
                {"emotion": "neutral", "count": 12}
            ]
        },
        "resume_analysis": {"keyword_match": 72, "relevance_score": 81},
        "mcq_performance": {
            "average_score": 5.9,
            "above_ideal": 9,
            "difficulty_analysis": [
                {"level": "easy", "correct": 80, "total": 100, "successRate": 80.0}
            ]
        },
        "case_study": {
            "average_score": 7.1,
            "completion_rate": 85,
            "key_insights": ["85% completion rate indicates good engagement"]
        },
        "technical_insights": {
            "total_responses": 100,
            "tab_switching": {"average": 1.256, "max": 9, "compliant": 80, "non_compliant": 20},
            "video_upload_success": 95,
            "screen_recording_success": 90
        },
        "geography": [
            {"home_address": "Bangalore", "candidate_count": 40},
            {"home_address": "Unknown", "candidate_count": 3}
        ]
    }"#;

    #[test]
    fn test_analytics_full_payload() {
        let a: Analytics = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(a.overview.total_applications, 100);
        assert_eq!(a.timeline.len(), 2);
        assert_eq!(a.video_assessment.emotional_analysis[0].emotion, "happy");
        assert_eq!(a.mcq_performance.difficulty_analysis[0].success_rate, 80.0);
        let tech = a.technical_insights.unwrap();
        assert_eq!(tech.tab_switching.unwrap().max, 9);
        assert_eq!(a.geography[1].candidate_count, 3);
    }

    #[test]
    fn test_analytics_missing_technical_insights() {
        // Server sends null (or omits the key) when there are no responses.
        let mut value: serde_json::Value = serde_json::from_str(SAMPLE).unwrap();
        value["technical_insights"] = serde_json::Value::Null;
        let a: Analytics = serde_json::from_value(value).unwrap();
        assert!(a.technical_insights.is_none());

        let mut value: serde_json::Value = serde_json::from_str(SAMPLE).unwrap();
        value.as_object_mut().unwrap().remove("technical_insights");
        let a: Analytics = serde_json::from_value(value).unwrap();
        assert!(a.technical_insights.is_none());
    }

    #[test]
    fn test_analytics_integer_scores_accepted() {
        // Averages arrive as bare integers when the server rounds evenly.
        let mut value: serde_json::Value = serde_json::from_str(SAMPLE).unwrap();
        value["video_assessment"]["average_score"] = serde_json::json!(6);
        let a: Analytics = serde_json::from_value(value).unwrap();
        assert_eq!(a.video_assessment.average_score, 6.0);
    }

    #[test]
    fn test_job_with_null_logo() {
        let json = r#"{
            "job_id": 42,
            "job_title": "Backend Engineer",
            "comp_name": "PeppyPick",
            "company_logo": null,
            "created_date": "Wed, 02 Oct 2024 00:00:00 GMT",
            "total_applications": 10,
            "total_submissions": 6,
            "completed_submissions": 4
        }"#;
        let job: Job = serde_json::from_str(json).unwrap();
        assert_eq!(job.job_id, 42);
        assert!(job.company_logo.is_none());
        assert_eq!(job.total_submissions, Some(6));
    }
}
