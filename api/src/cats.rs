use query::{QueryKey, Subscription};
use serde::{Deserialize, Serialize};
use store::{Record, RecordId};

use crate::{
    ApiError,
    context::{AppContext, CATS},
    invoker::RemoteRequest,
    tags,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cat {
    pub id: RecordId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Record for Cat {
    fn record_id(&self) -> Option<RecordId> {
        Some(self.id)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CatCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CatUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CatListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_age: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_age: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl AppContext {
    /// Lists cats. The result provides one tag per returned cat plus the
    /// list tag, so both single-record and list writes refresh it.
    #[tracing::instrument(skip_all)]
    pub fn list_cats(&self, params: &CatListParams) -> Result<Subscription<Vec<Cat>>, ApiError> {
        let key = QueryKey::new("cats_list", params)?;
        let request = RemoteRequest::get(self.config().url("cats/"))
            .with_params(serde_json::to_value(params).map_err(query::ParamsError::from)?);
        let fetch = self.fetch_json::<Vec<Cat>>(request);

        Ok(self.queries().run_query(
            key,
            |cats: &Vec<Cat>| {
                let mut provided: Vec<String> = cats.iter().map(|cat| tags::cat(cat.id)).collect();
                provided.push(tags::CAT_LIST.to_string());
                provided
            },
            fetch,
        ))
    }

    #[tracing::instrument(fields(?id), skip_all)]
    pub fn get_cat(&self, id: RecordId) -> Result<Subscription<Cat>, ApiError> {
        let key = QueryKey::new("cats_get", &id)?;
        let request = RemoteRequest::get(self.config().url(&format!("cats/{id}/")));
        let fetch = self.fetch_json::<Cat>(request);

        Ok(self
            .queries()
            .run_query(key, |cat: &Cat| vec![tags::cat(cat.id)], fetch))
    }

    #[tracing::instrument(skip_all)]
    pub async fn create_cat(&self, new_cat: &CatCreate) -> Result<Cat, ApiError> {
        let request = RemoteRequest::post(self.config().url("cats/"))
            .with_body(serde_json::to_value(new_cat).map_err(query::ParamsError::from)?);

        let cat = self
            .queries()
            .run_mutation("cats_create", vec![tags::CAT_LIST.to_string()], || {
                self.send::<Cat>(request)
            })
            .await?;

        Ok(cat)
    }

    #[tracing::instrument(fields(?id), skip_all)]
    pub async fn update_cat(&self, id: RecordId, updates: &CatUpdate) -> Result<Cat, ApiError> {
        let request = RemoteRequest::patch(self.config().url(&format!("cats/{id}/")))
            .with_body(serde_json::to_value(updates).map_err(query::ParamsError::from)?);

        let cat = self
            .queries()
            .run_mutation("cats_update", vec![tags::cat(id)], || {
                self.send::<Cat>(request)
            })
            .await?;

        Ok(cat)
    }

    #[tracing::instrument(fields(?id), skip_all)]
    pub async fn delete_cat(&self, id: RecordId) -> Result<(), ApiError> {
        let request = RemoteRequest::delete(self.config().url(&format!("cats/{id}/")));

        self.queries()
            .run_mutation(
                "cats_delete",
                vec![tags::cat(id), tags::CAT_LIST.to_string()],
                || self.send::<serde_json::Value>(request),
            )
            .await?;

        // tag invalidation only refreshes lists; the record itself goes now
        self.store().remove(CATS, id);

        Ok(())
    }
}
