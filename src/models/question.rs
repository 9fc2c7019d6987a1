use serde::{Deserialize, Serialize};

/// Every question carries exactly four answer options.
pub const OPTION_COUNT: usize = 4;

/// A single multiple-choice question.
///
/// Authoring convention: the document format lists the correct option first,
/// so `correct_index` is always `0` when a question comes out of the
/// importer. The session randomizer reorders the options and recomputes it.
///
/// `options[i]` and `option_images[i]` are positionally paired; images are
/// self-contained `data:<mime>;base64,...` URIs so no external references
/// survive the import.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Opaque identifier, unique within one import batch.
    pub id: String,
    /// Prompt text (may be empty when the prompt is image-only).
    pub text: String,
    /// Optional prompt image as a data URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub options: [String; OPTION_COUNT],
    #[serde(default)]
    pub option_images: [Option<String>; OPTION_COUNT],
    /// Index of the graded option within `options`.
    pub correct_index: usize,
}

impl Question {
    /// Build a freshly imported question; option 0 is the authored answer.
    pub fn authored(
        id: String,
        text: String,
        image: Option<String>,
        options: [String; OPTION_COUNT],
        option_images: [Option<String>; OPTION_COUNT],
    ) -> Self {
        Self {
            id,
            text,
            image,
            options,
            option_images,
            correct_index: 0,
        }
    }

    /// A prompt counts as present when it has text or an image.
    pub fn has_prompt(&self) -> bool {
        !self.text.is_empty() || self.image.is_some()
    }
}
