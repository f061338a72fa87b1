//! Syncing stored photo answers to an external media host.
//!
//! An external scheduler runs this on an interval (see
//! `SurveyConfig::media_sync_interval`). The operation is idempotent:
//! already-synced photos are skipped, so re-running it never duplicates
//! uploads. Individual failures are logged and do not abort the batch.

use survey_collect_types::{Answer, AnswerValue, StoredImage};

/// An external media host accepting image uploads.
pub trait MediaHost {
    /// Upload a stored image, returning the host's id for it.
    fn upload(&self, image: &StoredImage) -> anyhow::Result<String>;
}

/// Push every unsynced photo answer to the media host.
///
/// Records the returned remote id on each successfully synced answer.
/// Returns how many answers were synced in this run.
pub fn sync_unsynced_photos(answers: &mut [Answer], host: &dyn MediaHost) -> usize {
    let mut synced = 0;
    for answer in answers {
        let AnswerValue::Photo(image) = &mut answer.value else {
            continue;
        };
        if image.is_synced() {
            continue;
        }
        match host.upload(image) {
            Ok(remote_id) => {
                image.remote_id = Some(remote_id);
                synced += 1;
            }
            Err(error) => {
                log::warn!("failed to sync {}: {error:#}", image.filename);
            }
        }
    }
    synced
}
