use chrono::{Duration, Utc};
use rand::Rng;
use rand::distr::Alphanumeric;
use serde_json::{Value, json};

pub const CAPABILITIES: &[&str] = &[
    "Content Generation",
    "Performance Analysis",
    "Smart Scheduling",
    "Campaign Optimization",
    "Audience Insights",
    "Automated Reporting",
];

/// Canned response per action name. Unknown actions yield a structured
/// failure payload, not an error.
pub fn dispatch(action: &str, platform: Option<&str>) -> Value {
    match action {
        "generate-content" => json!({
            "success": true,
            "content": {
                "title": "AI-Generated Marketing Post",
                "body": "Exciting news! Our latest product feature is now live. \
                         Experience the future of digital marketing automation with \
                         our AI-powered platform. #Marketing #AI #Innovation",
                "hashtags": ["#Marketing", "#AI", "#Innovation", "#DigitalMarketing"],
                "suggestedImage": "product-launch.jpg",
                "bestTimeToPost": (Utc::now() + Duration::hours(1)).to_rfc3339(),
            }
        }),
        "analyze-performance" => json!({
            "success": true,
            "insights": {
                "engagementRate": 8.4,
                "reachGrowth": 12.5,
                "topPerformingContent": "Video posts",
                "recommendation": "Increase video content by 30% for better engagement",
            }
        }),
        "schedule-post" => json!({
            "success": true,
            "scheduled": {
                "postId": post_id(),
                "platform": platform,
                "scheduledFor": (Utc::now() + Duration::hours(1)).to_rfc3339(),
            }
        }),
        "optimize-campaign" => json!({
            "success": true,
            "optimizations": {
                "budgetReallocation": {
                    "instagram": "+15%",
                    "linkedin": "-5%",
                    "meta": "+10%",
                },
                "expectedROI": "4.2x",
                "estimatedReach": "+25%",
            }
        }),
        _ => json!({ "success": false, "error": "Unknown action" }),
    }
}

fn post_id() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(7)
        .map(char::from)
        .collect::<String>()
        .to_lowercase()
}
