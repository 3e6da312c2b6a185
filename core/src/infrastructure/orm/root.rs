use std::{collections::BTreeMap, marker::PhantomData};

use sea_orm::{
    Iterable, RelationDef, RelationTrait,
    entity::prelude::{ColumnTrait, EntityTrait, IdenStatic},
    sea_query::ColumnType,
};

use crate::domain::condition::{ports::EntityRoot, value_objects::FieldType};

/// A relation the select must join so an associated attribute is reachable.
#[derive(Debug)]
pub struct Join {
    /// Dotted association path, e.g. `dept` or `dept.site`.
    pub path: String,
    pub relation: RelationDef,
    /// Alias the joined table is referenced under, `None` for its table name.
    pub alias: Option<String>,
}

/// Entity root whose associations are reachable through sea-orm relations.
pub trait JoinedRoot: EntityRoot {
    fn as_entity_root(&self) -> &dyn EntityRoot;

    fn join_alias(&self) -> Option<&str>;

    /// Joins needed to reach `name`, outermost first. Plain attributes and
    /// unknown associations need none.
    fn joins(&self, name: &str) -> Vec<Join>;
}

struct Association {
    root: Box<dyn JoinedRoot>,
    relation: Box<dyn Fn() -> RelationDef>,
}

/// Navigation root backed by a sea-orm entity's columns.
///
/// Attributes are the entity's column names. Associations are registered
/// under the name used in dotted paths, together with the relation that
/// joins the associated entity.
pub struct SeaEntityRoot<E: EntityTrait> {
    table: String,
    alias: Option<String>,
    associations: BTreeMap<String, Association>,
    entity: PhantomData<E>,
}

impl<E: EntityTrait> SeaEntityRoot<E> {
    pub fn new() -> Self {
        Self {
            table: E::default().table_name().to_string(),
            alias: None,
            associations: BTreeMap::new(),
            entity: PhantomData,
        }
    }

    /// Joins this entity under `alias` instead of its table name.
    pub fn aliased(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_association<R, Rel>(mut self, name: impl Into<String>, root: R, relation: Rel) -> Self
    where
        R: JoinedRoot + 'static,
        Rel: RelationTrait,
    {
        self.associations.insert(
            name.into(),
            Association {
                root: Box::new(root),
                relation: Box::new(move || relation.def()),
            },
        );
        self
    }
}

impl<E: EntityTrait> Default for SeaEntityRoot<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EntityTrait> EntityRoot for SeaEntityRoot<E> {
    fn alias(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.table)
    }

    fn attribute(&self, name: &str) -> Option<FieldType> {
        E::Column::iter()
            .find(|column| column.as_str() == name)
            .map(|column| field_type(column.def().get_column_type()))
    }

    fn association(&self, name: &str) -> Option<&dyn EntityRoot> {
        self.associations
            .get(name)
            .map(|association| association.root.as_entity_root())
    }
}

impl<E: EntityTrait> JoinedRoot for SeaEntityRoot<E> {
    fn as_entity_root(&self) -> &dyn EntityRoot {
        self
    }

    fn join_alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    fn joins(&self, name: &str) -> Vec<Join> {
        let Some((head, rest)) = name.split_once('.') else {
            return Vec::new();
        };
        let Some(association) = self.associations.get(head) else {
            return Vec::new();
        };

        let mut joins = vec![Join {
            path: head.to_string(),
            relation: (association.relation)(),
            alias: association.root.join_alias().map(str::to_string),
        }];
        joins.extend(association.root.joins(rest).into_iter().map(|join| Join {
            path: format!("{head}.{}", join.path),
            ..join
        }));
        joins
    }
}

pub fn field_type(column_type: &ColumnType) -> FieldType {
    match column_type {
        ColumnType::Boolean => FieldType::Bool,
        ColumnType::TinyInteger
        | ColumnType::SmallInteger
        | ColumnType::Integer
        | ColumnType::BigInteger
        | ColumnType::TinyUnsigned
        | ColumnType::SmallUnsigned
        | ColumnType::Unsigned
        | ColumnType::BigUnsigned => FieldType::Int,
        ColumnType::Float | ColumnType::Double | ColumnType::Decimal(_) | ColumnType::Money(_) => {
            FieldType::Float
        }
        ColumnType::Date => FieldType::Date,
        ColumnType::DateTime | ColumnType::Timestamp | ColumnType::TimestampWithTimeZone => {
            FieldType::DateTime
        }
        ColumnType::Uuid => FieldType::Uuid,
        _ => FieldType::Text,
    }
}
