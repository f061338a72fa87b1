//! Upload and URL answer validators: photo, video.

use survey_collect_types::{AnswerValue, FieldError, StoredImage};

use super::{AnswerForm, AnswerValidator, Runtime, Validated, scalar_input};

/// Image upload.
///
/// The uploaded bytes must be a readable image with extractable dimensions;
/// only the headers are inspected, never the full pixel data.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhotoValidator;

impl AnswerValidator for PhotoValidator {
    fn validate(&self, form: &AnswerForm, _runtime: &Runtime) -> Result<Validated, Vec<FieldError>> {
        let Some(file) = form.file() else {
            if form.required() {
                return Err(vec![FieldError::required()]);
            }
            return Ok(Validated::Empty);
        };
        match imagesize::blob_size(&file.bytes) {
            Ok(size) => Ok(Validated::Value(AnswerValue::Photo(StoredImage::new(
                file.filename.clone(),
                size.width as u32,
                size.height as u32,
            )))),
            Err(_) => Err(vec![FieldError::new(
                "We couldn't read your file. Make sure it's a .jpeg, .png, or \
                 .gif file, not a .psd or other unsupported type.",
            )]),
        }
    }
}

/// Video URL input.
///
/// With an embed-expansion capability configured, the URL is accepted only
/// if the external service can expand it. Without one, the configured URL
/// pattern list is tried in order and the first match's matched substring
/// is kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct VideoValidator;

impl AnswerValidator for VideoValidator {
    fn validate(&self, form: &AnswerForm, runtime: &Runtime) -> Result<Validated, Vec<FieldError>> {
        let Some(value) = scalar_input(form)? else {
            return Ok(Validated::Empty);
        };

        if let Some(embed) = runtime.embed {
            match embed.expand(value) {
                Ok(Some(_)) => return Ok(Validated::Value(AnswerValue::Text(value.to_string()))),
                Ok(None) => log::debug!("couldn't expand {value}"),
                Err(error) => log::warn!("embed expansion failed for {value}: {error:#}"),
            }
        } else if let Some(matched) = runtime
            .config
            .video_url_patterns
            .iter()
            .find_map(|pattern| pattern.find(value))
        {
            return Ok(Validated::Value(AnswerValue::Text(
                matched.as_str().to_string(),
            )));
        }

        Err(vec![FieldError::new("Unknown video url format.")])
    }
}
