//! Subcommands and their execution.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Subcommand};
use serde::Serialize;
use serde_json::Value;
use starpoint_client::Client;
use starpoint_client::prelude::*;

/// Collection selector arguments shared by document and query commands.
#[derive(Debug, Clone, Args)]
pub struct SelectorArgs {
    /// Id of the target collection
    #[arg(long)]
    pub collection_id: Option<String>,

    /// Name of the target collection
    #[arg(long)]
    pub collection_name: Option<String>,
}

impl SelectorArgs {
    fn selector(&self) -> anyhow::Result<CollectionSelector> {
        Ok(CollectionSelector::from_parts(
            self.collection_id.clone(),
            self.collection_name.clone(),
        )?)
    }
}

/// Operation to run against Starpoint.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Checks the reader, writer and embedding hosts
    Health,

    /// Creates a collection
    CreateCollection {
        /// Collection name
        #[arg(long)]
        name: String,
        /// Dimensionality of the collection's vectors
        #[arg(long, allow_negative_numbers = true)]
        dimensionality: i64,
    },

    /// Deletes a collection
    DeleteCollection {
        /// Id of the collection to delete
        #[arg(long)]
        collection_id: String,
    },

    /// Runs a query against a collection
    Query {
        #[command(flatten)]
        selector: SelectorArgs,
        /// SQL to run
        #[arg(long)]
        sql: Option<String>,
        /// Query embedding as a JSON array
        #[arg(long)]
        embedding: Option<String>,
    },

    /// Infers the metadata schema of a collection
    InferSchema {
        #[command(flatten)]
        selector: SelectorArgs,
    },

    /// Embeds texts with a Starpoint-hosted model
    Embed {
        /// Texts to embed
        #[arg(required = true)]
        texts: Vec<String>,
    },

    /// Embeds texts with OpenAI and inserts them into a collection
    BuildAndInsert {
        #[command(flatten)]
        selector: SelectorArgs,
        /// OpenAI embedding model
        #[arg(long, default_value = starpoint_core::openai::DEFAULT_OPENAI_MODEL)]
        model: String,
        /// File containing the OpenAI API key
        #[arg(long)]
        openai_key_file: Option<PathBuf>,
        /// Texts to embed
        #[arg(required = true)]
        texts: Vec<String>,
    },
}

/// Output of a command and whether it succeeded.
#[derive(Debug)]
pub struct Outcome {
    /// JSON written to stdout.
    pub output: Value,
    /// Whether the operation succeeded.
    pub success: bool,
}

impl Outcome {
    fn envelope<T: Serialize>(result: &ApiResult<T>) -> anyhow::Result<Self> {
        Ok(Self {
            output: serde_json::to_value(result).context("failed to serialize result")?,
            success: result.is_data(),
        })
    }
}

impl Command {
    /// Returns the subcommand name as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::CreateCollection { .. } => "create-collection",
            Self::DeleteCollection { .. } => "delete-collection",
            Self::Query { .. } => "query",
            Self::InferSchema { .. } => "infer-schema",
            Self::Embed { .. } => "embed",
            Self::BuildAndInsert { .. } => "build-and-insert",
        }
    }

    /// Runs the command.
    pub async fn execute(self, mut client: Client) -> anyhow::Result<Outcome> {
        match self {
            Self::Health => {
                let health = client.health_check().await;
                Ok(Outcome {
                    success: health.is_available(),
                    output: serde_json::to_value(&health).context("failed to serialize health")?,
                })
            }
            Self::CreateCollection {
                name,
                dimensionality,
            } => {
                let request = CreateCollectionRequest::new(name, dimensionality);
                Outcome::envelope(&client.create_collection(request).await)
            }
            Self::DeleteCollection { collection_id } => {
                let request = DeleteCollectionRequest::new(collection_id);
                Outcome::envelope(&client.delete_collection(request).await)
            }
            Self::Query {
                selector,
                sql,
                embedding,
            } => {
                let mut request = QueryRequest::new(selector.selector()?);
                if let Some(sql) = sql {
                    request = request.with_sql(sql);
                }
                if let Some(embedding) = embedding {
                    let embedding: Vec<f32> = serde_json::from_str(&embedding)
                        .context("query embedding must be a JSON array of numbers")?;
                    request = request.with_query_embedding(embedding);
                }
                Outcome::envelope(&client.query(request).await)
            }
            Self::InferSchema { selector } => {
                let request = InferSchemaRequest::new(selector.selector()?);
                Outcome::envelope(&client.infer_schema(request).await)
            }
            Self::Embed { texts } => {
                Outcome::envelope(&client.embed(texts, EmbeddingModel::MiniLm).await)
            }
            Self::BuildAndInsert {
                selector,
                model,
                openai_key_file,
                texts,
            } => {
                if let Some(path) = openai_key_file {
                    client
                        .init_openai(&InitOpenAiRequest::from_key_file(path))
                        .context("failed to initialize OpenAI")?;
                }
                let request =
                    BuildAndInsertEmbeddingsFromOpenAiRequest::new(selector.selector()?, model, texts);
                Outcome::envelope(
                    &client
                        .build_and_insert_embeddings_from_openai(request)
                        .await,
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use starpoint_core::ValidationError;

    use super::*;

    #[test]
    fn test_selector_requires_exactly_one() {
        let args = SelectorArgs {
            collection_id: None,
            collection_name: None,
        };
        let error = args.selector().unwrap_err();
        assert_eq!(
            error.downcast_ref::<ValidationError>(),
            Some(&ValidationError::NoCollectionValue)
        );

        let args = SelectorArgs {
            collection_id: Some("c1".into()),
            collection_name: None,
        };
        assert_eq!(args.selector().unwrap(), CollectionSelector::id("c1"));
    }

    #[tokio::test]
    async fn test_invalid_request_reports_error_envelope() {
        let client = Client::new(ClientConfig::new(uuid::Uuid::nil())).unwrap();
        let command = Command::CreateCollection {
            name: String::new(),
            dimensionality: 3,
        };

        let outcome = command.execute(client).await.unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.output["data"], Value::Null);
        assert_eq!(
            outcome.output["error"]["error_message"],
            starpoint_core::validation::CREATE_COLLECTION_MISSING_NAME_ERROR
        );
    }
}
