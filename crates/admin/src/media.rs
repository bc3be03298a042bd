//! Media library operations.

use reqwest::multipart::{Form, Part};
use tracing::instrument;

use sadok_core::KeyValueStore;

use crate::client::{AdminClient, AdminError};
use crate::types::{ImageUpload, MediaFile, MediaFileUpdate, MediaStats};

#[derive(Debug, serde::Deserialize)]
struct DeleteAck {
    #[allow(dead_code)]
    message: String,
}

impl<S: KeyValueStore> AdminClient<S> {
    /// Upload an image and get back its served URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the file type is rejected or the request fails.
    #[instrument(skip(self, bytes), fields(filename = %filename, size = bytes.len()))]
    pub async fn upload_image(
        &self,
        filename: &str,
        bytes: Vec<u8>,
        mime_type: &str,
    ) -> Result<ImageUpload, AdminError> {
        let part = Part::bytes(bytes)
            .file_name(filename.to_owned())
            .mime_str(mime_type)?;
        let form = Form::new().part("file", part);

        self.post_multipart("/api/admin/upload-image", form).await
    }

    /// Upload a file into the media library.
    ///
    /// # Errors
    ///
    /// Returns an error if the file type is rejected or the request fails.
    #[instrument(skip(self, bytes), fields(filename = %filename, folder = %folder))]
    pub async fn upload_media_file(
        &self,
        filename: &str,
        bytes: Vec<u8>,
        mime_type: &str,
        folder: &str,
        alt_text: Option<&str>,
        title: Option<&str>,
    ) -> Result<MediaFile, AdminError> {
        let part = Part::bytes(bytes)
            .file_name(filename.to_owned())
            .mime_str(mime_type)?;
        let mut form = Form::new()
            .part("file", part)
            .text("folder", folder.to_owned());
        if let Some(alt_text) = alt_text {
            form = form.text("alt_text", alt_text.to_owned());
        }
        if let Some(title) = title {
            form = form.text("title", title.to_owned());
        }

        self.post_multipart("/api/media/upload", form).await
    }

    /// List media files, optionally filtered by type and folder.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_media_files(
        &self,
        file_type: Option<&str>,
        folder: Option<&str>,
    ) -> Result<Vec<MediaFile>, AdminError> {
        let mut query = Vec::new();
        if let Some(file_type) = file_type {
            query.push(("file_type", file_type.to_string()));
        }
        if let Some(folder) = folder {
            query.push(("folder", folder.to_string()));
        }

        self.get_json("/api/media/files", &query).await
    }

    /// Update a media file's metadata (alt text, title, folder).
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or the request fails.
    #[instrument(skip(self, update), fields(file_id = %file_id))]
    pub async fn update_media_file(
        &self,
        file_id: &str,
        update: &MediaFileUpdate,
    ) -> Result<MediaFile, AdminError> {
        self.put_json(&format!("/api/media/files/{file_id}"), update)
            .await
    }

    /// Delete a media file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or the request fails.
    #[instrument(skip(self), fields(file_id = %file_id))]
    pub async fn delete_media_file(&self, file_id: &str) -> Result<(), AdminError> {
        let _: DeleteAck = self
            .delete_json(&format!("/api/media/files/{file_id}"))
            .await?;
        Ok(())
    }

    /// Media library statistics (counts and total size).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_media_stats(&self) -> Result<MediaStats, AdminError> {
        self.get_json("/api/media/stats", &[]).await
    }
}
