use query::{QueryKey, Subscription};
use serde::{Deserialize, Serialize};
use store::{Record, RecordId};

use crate::{
    ApiError,
    context::{AppContext, SLIDESHOWS},
    invoker::RemoteRequest,
    tags,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slideshow {
    pub id: RecordId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub image_urls: Vec<String>,
    pub cat_id: RecordId,
    pub created_at: String,
    pub updated_at: String,
}

impl Record for Slideshow {
    fn record_id(&self) -> Option<RecordId> {
        Some(self.id)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SlideshowCreate {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub image_urls: Vec<String>,
    pub cat_id: RecordId,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SlideshowUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_urls: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cat_id: Option<RecordId>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SlideshowListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlideshowsByCatParams {
    pub cat_id: RecordId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlideshowsSearchParams {
    pub search_term: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

fn per_slideshow_and_list(slideshows: &Vec<Slideshow>) -> Vec<String> {
    let mut provided: Vec<String> = slideshows
        .iter()
        .map(|slideshow| tags::slideshow(slideshow.id))
        .collect();
    provided.push(tags::SLIDESHOW_LIST.to_string());
    provided
}

impl AppContext {
    #[tracing::instrument(skip_all)]
    pub fn list_slideshows(
        &self,
        params: &SlideshowListParams,
    ) -> Result<Subscription<Vec<Slideshow>>, ApiError> {
        let key = QueryKey::new("slideshows_list", params)?;
        let request = RemoteRequest::get(self.config().url("slideshows"))
            .with_params(serde_json::to_value(params).map_err(query::ParamsError::from)?);
        let fetch = self.fetch_json::<Vec<Slideshow>>(request);

        Ok(self
            .queries()
            .run_query(key, per_slideshow_and_list, fetch))
    }

    #[tracing::instrument(fields(?id), skip_all)]
    pub fn get_slideshow(&self, id: RecordId) -> Result<Subscription<Slideshow>, ApiError> {
        let key = QueryKey::new("slideshows_get", &id)?;
        let request = RemoteRequest::get(self.config().url(&format!("slideshows/{id}")));
        let fetch = self.fetch_json::<Slideshow>(request);

        Ok(self.queries().run_query(
            key,
            |slideshow: &Slideshow| vec![tags::slideshow(slideshow.id)],
            fetch,
        ))
    }

    /// Slideshows for one cat, tagged as a unit: any write declaring the
    /// by-cat tag refreshes the whole view.
    #[tracing::instrument(skip_all)]
    pub fn slideshows_by_cat(
        &self,
        params: &SlideshowsByCatParams,
    ) -> Result<Subscription<Vec<Slideshow>>, ApiError> {
        let key = QueryKey::new("slideshows_by_cat", params)?;
        let cat_id = params.cat_id;
        let request = RemoteRequest::get(
            self.config().url(&format!("slideshows/cat/{cat_id}")),
        )
        .with_params(serde_json::json!({ "skip": params.skip, "limit": params.limit }));
        let fetch = self.fetch_json::<Vec<Slideshow>>(request);

        Ok(self.queries().run_query(
            key,
            move |_: &Vec<Slideshow>| vec![tags::slideshows_by_cat(cat_id)],
            fetch,
        ))
    }

    #[tracing::instrument(skip_all)]
    pub fn search_slideshows(
        &self,
        params: &SlideshowsSearchParams,
    ) -> Result<Subscription<Vec<Slideshow>>, ApiError> {
        let key = QueryKey::new("slideshows_search", params)?;
        let term = params.search_term.clone();
        let request = RemoteRequest::get(
            self.config()
                .url(&format!("slideshows/search/{}", params.search_term)),
        )
        .with_params(serde_json::json!({ "skip": params.skip, "limit": params.limit }));
        let fetch = self.fetch_json::<Vec<Slideshow>>(request);

        Ok(self.queries().run_query(
            key,
            move |_: &Vec<Slideshow>| vec![tags::slideshows_search(&term)],
            fetch,
        ))
    }

    #[tracing::instrument(skip_all)]
    pub async fn create_slideshow(
        &self,
        new_slideshow: &SlideshowCreate,
    ) -> Result<Slideshow, ApiError> {
        let request = RemoteRequest::post(self.config().url("slideshows"))
            .with_body(serde_json::to_value(new_slideshow).map_err(query::ParamsError::from)?);

        let slideshow = self
            .queries()
            .run_mutation(
                "slideshows_create",
                vec![tags::SLIDESHOW_LIST.to_string()],
                || self.send::<Slideshow>(request),
            )
            .await?;

        Ok(slideshow)
    }

    #[tracing::instrument(fields(?id), skip_all)]
    pub async fn update_slideshow(
        &self,
        id: RecordId,
        updates: &SlideshowUpdate,
    ) -> Result<Slideshow, ApiError> {
        let request = RemoteRequest::patch(self.config().url(&format!("slideshows/{id}")))
            .with_body(serde_json::to_value(updates).map_err(query::ParamsError::from)?);

        let slideshow = self
            .queries()
            .run_mutation("slideshows_update", vec![tags::slideshow(id)], || {
                self.send::<Slideshow>(request)
            })
            .await?;

        Ok(slideshow)
    }

    #[tracing::instrument(fields(?id), skip_all)]
    pub async fn delete_slideshow(&self, id: RecordId) -> Result<(), ApiError> {
        let request = RemoteRequest::delete(self.config().url(&format!("slideshows/{id}")));

        self.queries()
            .run_mutation(
                "slideshows_delete",
                vec![tags::slideshow(id), tags::SLIDESHOW_LIST.to_string()],
                || self.send::<serde_json::Value>(request),
            )
            .await?;

        self.store().remove(SLIDESHOWS, id);

        Ok(())
    }
}
