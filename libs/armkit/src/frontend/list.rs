use std::marker::PhantomData;
use std::sync::Arc;

use armkit_database::{DatabaseClient, Object, Query, QueryOptions};
use async_trait::async_trait;

use crate::api::{ArmRequestContext, PaginatedList};
use crate::conv::{ConversionError, ConverterRegistry, DataModel};
use crate::frontend::error::ControllerError;
use crate::frontend::next_link::next_link_url;

/// A list operation bound to one resource type.
#[async_trait]
pub trait ListOperation: Send + Sync {
    fn resource_type(&self) -> &'static str;

    /// List the resources addressed by `ctx` and project them to `ctx.api_version`.
    async fn run(&self, ctx: &ArmRequestContext) -> Result<PaginatedList, ControllerError>;
}

/// Generic list controller for stored model `T`.
pub struct ListResources<T> {
    db: Arc<dyn DatabaseClient>,
    converters: Arc<ConverterRegistry>,
    list_recursive: bool,
    _model: PhantomData<fn() -> T>,
}

impl<T: DataModel> ListResources<T> {
    #[must_use]
    pub fn new(
        db: Arc<dyn DatabaseClient>,
        converters: Arc<ConverterRegistry>,
        list_recursive: bool,
    ) -> Self {
        Self {
            db,
            converters,
            list_recursive,
            _model: PhantomData,
        }
    }

    #[must_use]
    pub fn list_recursive(&self) -> bool {
        self.list_recursive
    }

    fn materialize(item: &Object) -> Result<T, ControllerError> {
        item.as_resource::<T>()
            .map_err(|source| ControllerError::Materialization {
                id: item.metadata.id.clone(),
                source,
            })
    }

    fn project(
        &self,
        id: &str,
        model: &T,
        api_version: &str,
    ) -> Result<serde_json::Value, ControllerError> {
        self.converters
            .to_wire(model, api_version)
            .map_err(|source| match source {
                ConversionError::UnsupportedApiVersion {
                    resource_type,
                    api_version,
                } => ControllerError::UnsupportedApiVersion {
                    resource_type,
                    api_version,
                },
                source => ControllerError::Projection {
                    id: id.to_owned(),
                    source,
                },
            })
    }
}

#[async_trait]
impl<T: DataModel> ListOperation for ListResources<T> {
    fn resource_type(&self) -> &'static str {
        T::RESOURCE_TYPE
    }

    async fn run(&self, ctx: &ArmRequestContext) -> Result<PaginatedList, ControllerError> {
        // Reject the version up front so an unusable request never reaches the store.
        if !self.converters.supports(T::RESOURCE_TYPE, &ctx.api_version) {
            return Err(ControllerError::UnsupportedApiVersion {
                resource_type: T::RESOURCE_TYPE.to_owned(),
                api_version: ctx.api_version.clone(),
            });
        }

        let target = &ctx.resource_id;
        let query = Query::new(target.root_scope(), target.resource_type())
            .with_scope_recursive(self.list_recursive);
        let options = QueryOptions::new()
            .with_pagination_token(ctx.skip_token.clone())
            .with_max_query_item_count(ctx.top);

        let result = self.db.query(&query, &options).await.map_err(|e| {
            tracing::warn!(
                resource_type = %query.resource_type,
                root_scope = %query.root_scope,
                error = %e,
                "store query failed"
            );
            ControllerError::from(e)
        })?;

        // A page is all-or-nothing: every item is materialized before any is projected.
        let models = result
            .items
            .iter()
            .map(|item| Self::materialize(item).map(|m| (item.metadata.id.as_str(), m)))
            .collect::<Result<Vec<_>, _>>()?;

        let value = models
            .iter()
            .map(|(id, model)| self.project(id, model, &ctx.api_version))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            resource_type = %query.resource_type,
            root_scope = %query.root_scope,
            recursive = query.scope_recursive,
            count = value.len(),
            has_more = result.pagination_token.is_some(),
            "listed resources"
        );

        Ok(PaginatedList {
            value,
            next_link: next_link_url(&ctx.request_url, result.pagination_token.as_deref()),
        })
    }
}
