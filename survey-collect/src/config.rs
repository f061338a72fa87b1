use std::time::Duration;

use regex::Regex;

/// Startup configuration for survey collection.
///
/// Built once at process start and passed by reference into the components
/// that need it. Defaults match the stock deployment: youtube watch URLs,
/// 250x250 default thumbnails, a 5 minute media sync interval.
#[derive(Debug, Clone)]
pub struct SurveyConfig {
    /// Accepted video URL patterns, tried in order when no embed provider
    /// is configured. The matched substring of the first hit is kept.
    pub video_url_patterns: Vec<Regex>,

    pub thumbnails: ThumbnailSizes,

    /// Default "moderate submissions" value for new surveys.
    pub moderate_submissions: bool,

    /// Return address for submission notification mail.
    pub survey_email_from: String,

    /// Storage path pattern for uploaded images.
    pub image_upload_pattern: String,

    /// How often the external scheduler runs the photo sync job.
    pub media_sync_interval: Duration,
}

impl SurveyConfig {
    /// Replace the video URL pattern list.
    pub fn with_video_url_patterns(mut self, patterns: Vec<Regex>) -> Self {
        self.video_url_patterns = patterns;
        self
    }

    /// Set the default moderation flag.
    pub fn with_moderation(mut self, moderate: bool) -> Self {
        self.moderate_submissions = moderate;
        self
    }
}

impl Default for SurveyConfig {
    fn default() -> Self {
        // youtube has a lot of characters in their ids, so [^&]; they also
        // like to append extra query arguments, so no trailing anchor.
        let youtube = Regex::new(r"^http://www\.youtube\.com/watch\?v=[^&]+")
            .expect("default video pattern is well-formed");
        Self {
            video_url_patterns: vec![youtube],
            thumbnails: ThumbnailSizes::default(),
            moderate_submissions: false,
            survey_email_from: "donotreply@donotreply.com".to_string(),
            image_upload_pattern: "surveys/images/%Y/%m/%d".to_string(),
            media_sync_interval: Duration::from_secs(5 * 60),
        }
    }
}

/// Thumbnail sizes for uploaded image answers.
///
/// `max_enlarge` caps how far huge uploads may be enlarged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailSizes {
    pub default: (u32, u32),
    pub max_enlarge: (u32, u32),
}

impl Default for ThumbnailSizes {
    fn default() -> Self {
        Self {
            default: (250, 250),
            max_enlarge: (1000, 1000),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_accepts_youtube_watch_urls() {
        let config = SurveyConfig::default();
        let url = "http://www.youtube.com/watch?v=abc123&feature=related";
        let matched = config.video_url_patterns[0].find(url).unwrap();
        assert_eq!(matched.as_str(), "http://www.youtube.com/watch?v=abc123");
    }
}
