//! Memo relation tools: `memos_list_relations` and `memos_set_relations`.

use rmcp::{schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};

use super::required_uid;
use crate::memos::{
    MemoRelation, MemosClient, MemosError, MemosResult, NewRelation, RelationType, memo_uid,
};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListRelationsParams {
    #[schemars(required, description = "Memo UID or name (e.g., 'abc123' or 'memos/abc123')")]
    pub memo_uid: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationKind {
    /// One memo links to another
    Reference,
    /// The memo is a comment on the related memo
    Comment,
    TypeUnspecified,
}

impl From<RelationKind> for RelationType {
    fn from(kind: RelationKind) -> Self {
        match kind {
            RelationKind::Reference => RelationType::Reference,
            RelationKind::Comment => RelationType::Comment,
            RelationKind::TypeUnspecified => RelationType::TypeUnspecified,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RelationParam {
    #[schemars(description = "UID of the related memo")]
    pub related_memo_uid: String,
    #[schemars(
        description = "Relation type: REFERENCE (linking memos) or COMMENT (memo as comment on another)"
    )]
    #[serde(rename = "type")]
    pub kind: RelationKind,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SetRelationsParams {
    #[schemars(required, description = "Memo UID or name (e.g., 'abc123' or 'memos/abc123')")]
    pub memo_uid: Option<String>,
    #[schemars(
        required,
        description = "Relations to set. This replaces ALL existing relations. To add or remove one, list them first, modify the array, then set."
    )]
    pub relations: Option<Vec<RelationParam>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListRelationsResult {
    pub relations: Vec<MemoRelation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetRelationsResult {
    pub success: bool,
    pub uid: String,
}

pub async fn list_relations(
    client: &MemosClient,
    params: ListRelationsParams,
) -> MemosResult<ListRelationsResult> {
    let uid = required_uid(params.memo_uid.as_deref())?;
    let relations = client.list_memo_relations(&uid).await?;
    Ok(ListRelationsResult { relations })
}

pub async fn set_relations(
    client: &MemosClient,
    params: SetRelationsParams,
) -> MemosResult<SetRelationsResult> {
    let uid = required_uid(params.memo_uid.as_deref())?;
    let relations: Vec<NewRelation> = params
        .relations
        .ok_or(MemosError::MissingField { field: "relations" })?
        .into_iter()
        .map(|r| NewRelation {
            related_memo: memo_uid(r.related_memo_uid.trim()).to_string(),
            relation_type: r.kind.into(),
        })
        .collect();

    client.set_memo_relations(&uid, &relations).await?;

    Ok(SetRelationsResult { success: true, uid })
}
