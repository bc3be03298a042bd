//! CMS content operations (pages, hero section, footer links).

use tracing::instrument;

use sadok_core::KeyValueStore;

use crate::client::{AdminClient, AdminError};
use crate::types::{CmsPage, CmsPageUpdate, FooterLink, FooterLinkUpdate, HeroSection};

#[derive(Debug, serde::Deserialize)]
struct Ack {
    #[allow(dead_code)]
    message: String,
}

impl<S: KeyValueStore> AdminClient<S> {
    /// List all CMS pages.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_cms_pages(&self) -> Result<Vec<CmsPage>, AdminError> {
        self.get_json("/api/cms/pages", &[]).await
    }

    /// Get a CMS page by its key.
    ///
    /// # Errors
    ///
    /// Returns an error if the page does not exist or the request fails.
    #[instrument(skip(self))]
    pub async fn get_cms_page(&self, page_key: &str) -> Result<CmsPage, AdminError> {
        self.get_json(&format!("/api/cms/pages/{page_key}"), &[])
            .await
    }

    /// Create a CMS page.
    ///
    /// # Errors
    ///
    /// Returns an error if a page with the same key exists or the request
    /// fails.
    #[instrument(skip(self, page), fields(page_key = %page.page_key))]
    pub async fn create_cms_page(&self, page: &CmsPage) -> Result<CmsPage, AdminError> {
        self.post_json("/api/cms/pages", page).await
    }

    /// Update a CMS page; only the set fields change.
    ///
    /// # Errors
    ///
    /// Returns an error if the page does not exist or the request fails.
    #[instrument(skip(self, update))]
    pub async fn update_cms_page(
        &self,
        page_key: &str,
        update: &CmsPageUpdate,
    ) -> Result<CmsPage, AdminError> {
        self.put_json(&format!("/api/cms/pages/{page_key}"), update)
            .await
    }

    /// Delete a CMS page.
    ///
    /// # Errors
    ///
    /// Returns an error if the page does not exist or the request fails.
    #[instrument(skip(self))]
    pub async fn delete_cms_page(&self, page_key: &str) -> Result<(), AdminError> {
        let _: Ack = self
            .delete_json(&format!("/api/cms/pages/{page_key}"))
            .await?;
        Ok(())
    }

    /// Get the hero section.
    ///
    /// # Errors
    ///
    /// Returns an error if the hero section is not configured or the request
    /// fails.
    #[instrument(skip(self))]
    pub async fn get_hero_section(&self) -> Result<HeroSection, AdminError> {
        self.get_json("/api/cms/hero", &[]).await
    }

    /// Replace the hero section.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, hero))]
    pub async fn update_hero_section(&self, hero: &HeroSection) -> Result<(), AdminError> {
        let _: Ack = self.put_json("/api/cms/hero", hero).await?;
        Ok(())
    }

    /// List footer links.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_footer_links(&self) -> Result<Vec<FooterLink>, AdminError> {
        self.get_json("/api/cms/footer-links", &[]).await
    }

    /// Create a footer link.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, link), fields(title = %link.title))]
    pub async fn create_footer_link(&self, link: &FooterLink) -> Result<FooterLink, AdminError> {
        self.post_json("/api/cms/footer-links", link).await
    }

    /// Update a footer link; only the set fields change.
    ///
    /// # Errors
    ///
    /// Returns an error if the link does not exist or the request fails.
    #[instrument(skip(self, update))]
    pub async fn update_footer_link(
        &self,
        link_id: &str,
        update: &FooterLinkUpdate,
    ) -> Result<FooterLink, AdminError> {
        self.put_json(&format!("/api/cms/footer-links/{link_id}"), update)
            .await
    }

    /// Delete a footer link.
    ///
    /// # Errors
    ///
    /// Returns an error if the link does not exist or the request fails.
    #[instrument(skip(self))]
    pub async fn delete_footer_link(&self, link_id: &str) -> Result<(), AdminError> {
        let _: Ack = self
            .delete_json(&format!("/api/cms/footer-links/{link_id}"))
            .await?;
        Ok(())
    }
}
