use serde_json::{json, Map, Value};

use crate::types::{JobSnapshot, OperationRecord, PollPolicy};

/// Generate images from a text prompt.
///
/// # Example
/// ```
/// use firefly_rs::TextToImage;
///
/// let op = TextToImage::new("a red fox")
///     .size(1024, 1024)
///     .variations(1)
///     .into_operation();
/// assert_eq!(op.endpoint(), "/images/generate");
/// ```
#[derive(Debug, Clone)]
pub struct TextToImage {
    pub prompt: String,
    pub width: u32,
    pub height: u32,
    pub variations: u32,
    pub style: String,
}

impl TextToImage {
    /// New request with defaults: 1024×1024, 1 variation, style `auto`.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            width: 1024,
            height: 1024,
            variations: 1,
            style: "auto".to_string(),
        }
    }

    /// Set output dimensions.
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Number of images to generate (vendor accepts 1–4).
    pub fn variations(mut self, n: u32) -> Self {
        self.variations = n;
        self
    }

    /// Style preset (e.g. "auto", "photography", "digital-painting").
    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    pub fn into_operation(self) -> Operation {
        Operation::TextToImage(self)
    }
}

/// Generate a video from a text prompt. The only operation that can opt
/// into waiting for completion.
#[derive(Debug, Clone)]
pub struct TextToVideo {
    pub prompt: String,
    pub duration: u32,
    pub aspect_ratio: String,
    pub style: String,
    pub wait: Option<PollPolicy>,
}

impl TextToVideo {
    /// New request with defaults: 5 seconds, 16:9, style `auto`, no wait.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            duration: 5,
            aspect_ratio: "16:9".to_string(),
            style: "auto".to_string(),
            wait: None,
        }
    }

    /// Video length in seconds (vendor accepts 5/10/15/20).
    pub fn duration(mut self, seconds: u32) -> Self {
        self.duration = seconds;
        self
    }

    /// Aspect ratio (e.g. "16:9", "9:16", "1:1").
    pub fn aspect_ratio(mut self, ratio: impl Into<String>) -> Self {
        self.aspect_ratio = ratio.into();
        self
    }

    /// Style preset (e.g. "auto", "cinematic", "animated").
    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    /// Block until the job completes, polling every 5 seconds for at
    /// most `timeout_secs` of wall-clock time (ceiling-divided into the
    /// attempt budget).
    pub fn wait_for_completion(mut self, timeout_secs: u64) -> Self {
        self.wait = Some(PollPolicy::from_timeout_secs(timeout_secs));
        self
    }

    /// Wait with an explicit attempt budget and interval.
    pub fn wait_with_policy(mut self, policy: PollPolicy) -> Self {
        self.wait = Some(policy);
        self
    }

    pub fn into_operation(self) -> Operation {
        Operation::TextToVideo(self)
    }
}

/// Expand an uploaded image outward to a larger canvas.
#[derive(Debug, Clone)]
pub struct ExpandImage {
    pub image: String,
    pub width: u32,
    pub height: u32,
    pub prompt: String,
}

impl ExpandImage {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            width: 1024,
            height: 1024,
            prompt: String::new(),
        }
    }

    /// Target canvas size.
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Optional prompt guiding the expansion. Empty prompts are omitted
    /// from the payload.
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn into_operation(self) -> Operation {
        Operation::ExpandImage(self)
    }
}

/// Generative fill of masked regions in an uploaded image.
#[derive(Debug, Clone)]
pub struct FillImage {
    pub image: String,
    pub mask: String,
    pub prompt: String,
}

impl FillImage {
    pub fn new(
        image: impl Into<String>,
        mask: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            image: image.into(),
            mask: mask.into(),
            prompt: prompt.into(),
        }
    }

    pub fn into_operation(self) -> Operation {
        Operation::FillImage(self)
    }
}

/// Generate variations similar to a reference image.
#[derive(Debug, Clone)]
pub struct SimilarImages {
    pub image: String,
    pub prompt: String,
    pub variations: u32,
}

impl SimilarImages {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            prompt: String::new(),
            variations: 1,
        }
    }

    /// Optional guiding prompt. Empty prompts are omitted from the payload.
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn variations(mut self, n: u32) -> Self {
        self.variations = n;
        self
    }

    pub fn into_operation(self) -> Operation {
        Operation::SimilarImages(self)
    }
}

/// Composite prompt-described objects into a base image.
#[derive(Debug, Clone)]
pub struct ObjectComposite {
    pub image: String,
    pub prompt: String,
}

impl ObjectComposite {
    pub fn new(image: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            prompt: prompt.into(),
        }
    }

    pub fn into_operation(self) -> Operation {
        Operation::ObjectComposite(self)
    }
}

/// One Firefly capability with its validated parameters, dispatched
/// through [`FireflyClient::execute`](crate::FireflyClient::execute).
/// Keeps HTTP concerns in one place instead of scattered per operation.
#[derive(Debug, Clone)]
pub enum Operation {
    TextToImage(TextToImage),
    TextToVideo(TextToVideo),
    ExpandImage(ExpandImage),
    FillImage(FillImage),
    SimilarImages(SimilarImages),
    ObjectComposite(ObjectComposite),
}

impl Operation {
    /// API path the operation submits to.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Operation::TextToImage(_) => "/images/generate",
            Operation::TextToVideo(_) => "/videos/generate",
            Operation::ExpandImage(_) => "/images/expand",
            Operation::FillImage(_) => "/images/fill",
            Operation::SimilarImages(_) => "/images/generateSimilar",
            Operation::ObjectComposite(_) => "/images/objectComposite",
        }
    }

    /// Vendor-shaped JSON request body.
    pub fn payload(&self) -> Value {
        match self {
            Operation::TextToImage(p) => json!({
                "prompt": p.prompt,
                "n": p.variations,
                "size": {"width": p.width, "height": p.height},
                "style": {"preset": p.style},
            }),
            Operation::TextToVideo(p) => json!({
                "prompt": p.prompt,
                "duration": p.duration,
                "aspectRatio": p.aspect_ratio,
                "style": {"preset": p.style},
            }),
            Operation::ExpandImage(p) => {
                let mut body = json!({
                    "source": {"uploadId": p.image},
                    "size": {"width": p.width, "height": p.height},
                });
                if !p.prompt.is_empty() {
                    body["prompt"] = json!(p.prompt);
                }
                body
            }
            Operation::FillImage(p) => json!({
                "source": {"uploadId": p.image},
                "mask": {"uploadId": p.mask},
                "prompt": p.prompt,
            }),
            Operation::SimilarImages(p) => {
                let mut body = json!({
                    "source": {"uploadId": p.image},
                    "n": p.variations,
                });
                if !p.prompt.is_empty() {
                    body["prompt"] = json!(p.prompt);
                }
                body
            }
            Operation::ObjectComposite(p) => json!({
                "source": {"uploadId": p.image},
                "prompt": p.prompt,
            }),
        }
    }

    /// Poll policy when the operation opted into synchronous completion.
    /// Only video generation currently opts in; the poll loop itself is
    /// generic over job id.
    pub fn wait(&self) -> Option<PollPolicy> {
        match self {
            Operation::TextToVideo(p) => p.wait,
            _ => None,
        }
    }

    /// Record key the job's output artifacts land under.
    pub fn artifact_field(&self) -> &'static str {
        match self {
            Operation::TextToImage(_) => "images",
            Operation::TextToVideo(_) => "video",
            Operation::ExpandImage(_) => "expandedImage",
            Operation::FillImage(_) => "filledImage",
            Operation::SimilarImages(_) => "similarImages",
            Operation::ObjectComposite(_) => "compositeImage",
        }
    }

    /// Build the normalized result record for a job snapshot.
    /// `completed_at` is set only when the poll loop actually ran.
    pub(crate) fn record(
        &self,
        snapshot: &JobSnapshot,
        completed_at: Option<String>,
    ) -> OperationRecord {
        let mut fields = Map::new();
        if let Some(outputs) = &snapshot.outputs {
            fields.insert(self.artifact_field().to_string(), outputs.clone());
        }

        match self {
            Operation::TextToImage(p) => {
                fields.insert("prompt".into(), json!(p.prompt));
                fields.insert("size".into(), json!(format!("{}x{}", p.width, p.height)));
                fields.insert("variations".into(), json!(p.variations));
            }
            Operation::TextToVideo(p) => {
                fields.insert("prompt".into(), json!(p.prompt));
                fields.insert("duration".into(), json!(p.duration));
                fields.insert("aspectRatio".into(), json!(p.aspect_ratio));
                match &completed_at {
                    Some(ts) => {
                        fields.insert("completedAt".into(), json!(ts));
                    }
                    None => {
                        fields.insert("style".into(), json!(p.style));
                    }
                }
            }
            Operation::ExpandImage(p) => {
                fields.insert(
                    "targetSize".into(),
                    json!({"width": p.width, "height": p.height}),
                );
            }
            Operation::FillImage(p) => {
                fields.insert("prompt".into(), json!(p.prompt));
            }
            Operation::SimilarImages(p) => {
                fields.insert("variations".into(), json!(p.variations));
            }
            Operation::ObjectComposite(p) => {
                fields.insert("prompt".into(), json!(p.prompt));
            }
        }

        OperationRecord {
            job_id: snapshot.id.clone(),
            status: snapshot.status.clone(),
            fields,
        }
    }
}

impl From<TextToImage> for Operation {
    fn from(p: TextToImage) -> Self {
        Operation::TextToImage(p)
    }
}

impl From<TextToVideo> for Operation {
    fn from(p: TextToVideo) -> Self {
        Operation::TextToVideo(p)
    }
}

impl From<ExpandImage> for Operation {
    fn from(p: ExpandImage) -> Self {
        Operation::ExpandImage(p)
    }
}

impl From<FillImage> for Operation {
    fn from(p: FillImage) -> Self {
        Operation::FillImage(p)
    }
}

impl From<SimilarImages> for Operation {
    fn from(p: SimilarImages) -> Self {
        Operation::SimilarImages(p)
    }
}

impl From<ObjectComposite> for Operation {
    fn from(p: ObjectComposite) -> Self {
        Operation::ObjectComposite(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::JobStatus;

    #[test]
    fn test_text_to_image_payload() {
        let op = TextToImage::new("a red fox")
            .size(1024, 1024)
            .variations(1)
            .into_operation();
        assert_eq!(
            op.payload(),
            json!({
                "prompt": "a red fox",
                "n": 1,
                "size": {"width": 1024, "height": 1024},
                "style": {"preset": "auto"},
            })
        );
    }

    #[test]
    fn test_text_to_video_payload() {
        let op = TextToVideo::new("waves at dusk")
            .duration(10)
            .aspect_ratio("9:16")
            .style("cinematic")
            .into_operation();
        assert_eq!(
            op.payload(),
            json!({
                "prompt": "waves at dusk",
                "duration": 10,
                "aspectRatio": "9:16",
                "style": {"preset": "cinematic"},
            })
        );
    }

    #[test]
    fn test_expand_payload_omits_empty_prompt() {
        let op = ExpandImage::new("upload-1").size(2048, 1024).into_operation();
        let payload = op.payload();
        assert_eq!(payload["source"]["uploadId"], "upload-1");
        assert_eq!(payload["size"]["width"], 2048);
        assert!(payload.get("prompt").is_none());

        let op = ExpandImage::new("upload-1").prompt("more sky").into_operation();
        assert_eq!(op.payload()["prompt"], "more sky");
    }

    #[test]
    fn test_similar_payload_omits_empty_prompt() {
        let op = SimilarImages::new("upload-2").variations(3).into_operation();
        let payload = op.payload();
        assert_eq!(payload["n"], 3);
        assert!(payload.get("prompt").is_none());
    }

    #[test]
    fn test_fill_and_composite_payloads() {
        let op = FillImage::new("img", "mask", "a lake").into_operation();
        assert_eq!(
            op.payload(),
            json!({
                "source": {"uploadId": "img"},
                "mask": {"uploadId": "mask"},
                "prompt": "a lake",
            })
        );

        let op = ObjectComposite::new("base", "a vase on the table").into_operation();
        assert_eq!(
            op.payload(),
            json!({
                "source": {"uploadId": "base"},
                "prompt": "a vase on the table",
            })
        );
    }

    #[test]
    fn test_endpoints() {
        let cases: Vec<(Operation, &str)> = vec![
            (TextToImage::new("p").into(), "/images/generate"),
            (TextToVideo::new("p").into(), "/videos/generate"),
            (ExpandImage::new("i").into(), "/images/expand"),
            (FillImage::new("i", "m", "p").into(), "/images/fill"),
            (SimilarImages::new("i").into(), "/images/generateSimilar"),
            (ObjectComposite::new("i", "p").into(), "/images/objectComposite"),
        ];
        for (op, endpoint) in cases {
            assert_eq!(op.endpoint(), endpoint);
        }
    }

    #[test]
    fn test_only_video_opts_into_waiting() {
        assert!(TextToImage::new("p").into_operation().wait().is_none());
        assert!(TextToVideo::new("p").into_operation().wait().is_none());

        let op = TextToVideo::new("p").wait_for_completion(600).into_operation();
        assert_eq!(op.wait().unwrap().max_attempts, 120);
    }

    #[test]
    fn test_image_record_echoes_inputs() {
        let snapshot = JobSnapshot {
            id: "job-1".into(),
            status: JobStatus::Pending("RUNNING".into()),
            outputs: None,
            failure_message: None,
        };
        let op = TextToImage::new("a red fox").into_operation();
        let record = op.record(&snapshot, None);

        assert_eq!(record.job_id, "job-1");
        assert_eq!(record.status, JobStatus::Pending("RUNNING".into()));
        assert_eq!(record.get("prompt"), Some(&json!("a red fox")));
        assert_eq!(record.get("size"), Some(&json!("1024x1024")));
        assert_eq!(record.get("variations"), Some(&json!(1)));
        assert!(record.get("images").is_none());
    }

    #[test]
    fn test_waited_video_record_has_completion_timestamp() {
        let snapshot = JobSnapshot {
            id: "job-2".into(),
            status: JobStatus::Succeeded,
            outputs: Some(json!([{"video": {"url": "https://cdn/v.mp4"}}])),
            failure_message: None,
        };
        let op = TextToVideo::new("waves").wait_for_completion(10).into_operation();
        let record = op.record(&snapshot, Some("2026-01-01T00:00:00.000Z".into()));

        assert_eq!(record.status, JobStatus::Succeeded);
        assert!(record.get("video").is_some());
        assert_eq!(record.get("completedAt"), Some(&json!("2026-01-01T00:00:00.000Z")));
        assert_eq!(record.get("duration"), Some(&json!(5)));
        // style is only echoed on the fire-and-forget record
        assert!(record.get("style").is_none());
    }

    #[test]
    fn test_expand_record_reports_target_size() {
        let snapshot = JobSnapshot {
            id: "job-3".into(),
            status: JobStatus::Succeeded,
            outputs: Some(json!([{"image": {"url": "https://cdn/e.png"}}])),
            failure_message: None,
        };
        let op = ExpandImage::new("upload-1").size(2048, 1152).into_operation();
        let record = op.record(&snapshot, None);

        assert!(record.get("expandedImage").is_some());
        assert_eq!(
            record.get("targetSize"),
            Some(&json!({"width": 2048, "height": 1152}))
        );
    }
}
