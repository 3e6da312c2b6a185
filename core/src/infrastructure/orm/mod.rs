pub mod prepared;
pub mod render;
pub mod root;

use std::collections::BTreeSet;

use sea_orm::{EntityTrait, JoinType, QuerySelect, Select, sea_query::Alias};
use tracing::debug;

pub use prepared::PreparedSelect;
pub use render::render_condition;
pub use root::{Join, JoinedRoot, SeaEntityRoot};

use crate::{
    domain::condition::entities::{errors::ConditionError, filter::Filter},
    infrastructure::criteria::CriteriaBuilder,
};

/// `E::find()` filtered by every condition of `filter`, with the
/// conditions' stored values bound. Each association a condition walks
/// through is inner joined once.
pub fn filtered_select<E>(filter: &mut Filter, root: &SeaEntityRoot<E>) -> Result<Select<E>, ConditionError>
where
    E: EntityTrait,
{
    let predicate = filter.construct_predicate(&CriteriaBuilder, root)?;

    let mut select = E::find();
    let mut joined = BTreeSet::new();
    let joins = filter
        .conditions()
        .iter()
        .flat_map(|condition| root.joins(condition.name()));
    for join in joins {
        if !joined.insert(join.path.clone()) {
            continue;
        }
        debug!(path = %join.path, "joining association");
        select = match join.alias {
            Some(alias) => select.join_as(JoinType::InnerJoin, join.relation, Alias::new(alias)),
            None => select.join(JoinType::InnerJoin, join.relation),
        };
    }

    let mut prepared = PreparedSelect::new(select, predicate);
    filter.bind_parameters(&mut prepared)?;
    prepared.into_select()
}
