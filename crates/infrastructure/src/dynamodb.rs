use aws_config::{timeout::TimeoutConfig, BehaviorVersion, Region};
use aws_sdk_dynamodb::{
    error::DisplayErrorContext,
    types::{AttributeValue, ReturnValue},
    Client,
};
use chrono::{DateTime, Utc};
use domain::{Todo, TodoFields, TodoId};
use shared::Config;
use tracing::{error, info, warn};

use crate::models::{item_to_todo, todo_to_item, timestamp_value, DynamoDbKeys, TODO_PARTITION};
use crate::repositories::{sort_newest_first, StoreError, StoreResult, TodoStore};

/// 並行更新で条件が崩れ続けた場合に諦めるまでの試行回数
const MAX_REPLACE_ATTEMPTS: usize = 3;

/// 設定から DynamoDB クライアントを構築します。
/// `dynamodb_endpoint` があれば DynamoDB Local などへ向けます。
pub async fn build_client(config: &Config) -> Client {
    let timeouts = TimeoutConfig::builder()
        .connect_timeout(config.store_connect_timeout)
        .build();

    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.aws_region.clone()))
        .timeout_config(timeouts);
    if let Some(endpoint) = &config.dynamodb_endpoint {
        loader = loader.endpoint_url(endpoint);
    }

    let sdk_config = loader.load().await;
    Client::new(&sdk_config)
}

#[derive(Clone)]
pub struct DynamoDbTodoStore {
    client: Client,
    table_name: String,
}

impl DynamoDbTodoStore {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    pub async fn from_config(config: &Config) -> Self {
        Self::new(build_client(config).await, config.dynamodb_table.clone())
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// 保存済みの `updated_at` が `updated_at` 以下の場合だけ書き換えます。
    /// 条件が成立しなかった場合は `Ok(None)`。
    async fn try_replace(
        &self,
        id: &TodoId,
        fields: &TodoFields,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<Option<Todo>> {
        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .set_key(Some(DynamoDbKeys::for_todo(id).into_key_map()))
            .update_expression(
                "SET #title = :title, #description = :description, \
                 #completed = :completed, #updated_at = :updated_at",
            )
            .condition_expression("attribute_exists(SK) AND #updated_at <= :updated_at")
            .expression_attribute_names("#title", "title")
            .expression_attribute_names("#description", "description")
            .expression_attribute_names("#completed", "completed")
            .expression_attribute_names("#updated_at", "updated_at")
            .expression_attribute_values(":title", AttributeValue::S(fields.title().to_string()))
            .expression_attribute_values(
                ":description",
                AttributeValue::S(fields.description().to_string()),
            )
            .expression_attribute_values(":completed", AttributeValue::Bool(fields.completed()))
            .expression_attribute_values(":updated_at", timestamp_value(updated_at))
            .return_values(ReturnValue::AllNew)
            .send()
            .await;

        match result {
            Ok(output) => output.attributes.as_ref().map(item_to_todo).transpose(),
            Err(sdk_error)
                if sdk_error
                    .as_service_error()
                    .is_some_and(|e| e.is_conditional_check_failed_exception()) =>
            {
                Ok(None)
            }
            Err(sdk_error) => Err(backend(sdk_error)),
        }
    }
}

impl TodoStore for DynamoDbTodoStore {
    async fn ping(&self) -> StoreResult<()> {
        let output = self
            .client
            .describe_table()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(backend)?;

        info!(
            table_name = %self.table_name,
            status = ?output.table().and_then(|t| t.table_status()),
            "Connected to DynamoDB"
        );
        Ok(())
    }

    async fn list(&self) -> StoreResult<Vec<Todo>> {
        let mut todos = Vec::new();
        let mut start_key = None;

        loop {
            let output = self
                .client
                .query()
                .table_name(&self.table_name)
                .key_condition_expression("PK = :pk")
                .expression_attribute_values(":pk", AttributeValue::S(TODO_PARTITION.to_string()))
                .scan_index_forward(false)
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(backend)?;

            for item in output.items() {
                match item_to_todo(item) {
                    Ok(todo) => todos.push(todo),
                    Err(e) => {
                        error!(error = %e, "Failed to deserialize todo");
                    }
                }
            }

            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        // ソートキーは ULID 順（ミリ秒精度）なので、作成時刻で並べ直す
        sort_newest_first(&mut todos);
        Ok(todos)
    }

    async fn insert(&self, fields: TodoFields) -> StoreResult<Todo> {
        let todo = Todo::new(TodoId::new(), fields, Utc::now());

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(todo_to_item(&todo)))
            .condition_expression("attribute_not_exists(SK)")
            .send()
            .await
            .map_err(backend)?;

        info!(todo_id = todo.id.as_str(), "Todo saved successfully");
        Ok(todo)
    }

    async fn find(&self, id: &TodoId) -> StoreResult<Option<Todo>> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(DynamoDbKeys::for_todo(id).into_key_map()))
            .consistent_read(true)
            .send()
            .await
            .map_err(backend)?;

        output.item.as_ref().map(item_to_todo).transpose()
    }

    async fn replace(&self, id: &TodoId, fields: TodoFields) -> StoreResult<Option<Todo>> {
        let mut updated_at = Utc::now();

        for _ in 0..MAX_REPLACE_ATTEMPTS {
            if let Some(todo) = self.try_replace(id, &fields, updated_at).await? {
                info!(todo_id = todo.id.as_str(), "Todo updated successfully");
                return Ok(Some(todo));
            }

            // 条件不成立: 項目が無いか、保存済みの updated_at の方が新しい
            let Some(current) = self.find(id).await? else {
                return Ok(None);
            };
            warn!(
                todo_id = id.as_str(),
                stored = %current.updated_at,
                attempted = %updated_at,
                "Stored updated_at is ahead of the clock"
            );
            updated_at = updated_at.max(current.updated_at);
        }

        Err(StoreError::Backend(format!(
            "todo {id} kept changing during replace"
        )))
    }

    async fn remove(&self, id: &TodoId) -> StoreResult<Option<Todo>> {
        let output = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(DynamoDbKeys::for_todo(id).into_key_map()))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(backend)?;

        let removed = output.attributes.as_ref().map(item_to_todo).transpose()?;
        if removed.is_some() {
            info!(todo_id = id.as_str(), "Todo deleted successfully");
        }
        Ok(removed)
    }
}

fn backend<E>(e: E) -> StoreError
where
    E: std::error::Error,
{
    StoreError::Backend(DisplayErrorContext(e).to_string())
}
