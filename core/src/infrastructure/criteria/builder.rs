use crate::domain::condition::{
    ports::PredicateBuilder,
    value_objects::{FieldPath, Parameter, ParameterType},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    Equal,
    NotEqual,
    LessThanOrEqual,
    LessThan,
    GreaterThanOrEqual,
    GreaterThan,
}

/// Typed predicate tree over entity fields and named placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Comparison {
        path: FieldPath,
        comparison: Comparison,
        parameter: Parameter,
    },
    Between {
        path: FieldPath,
        from: Parameter,
        to: Parameter,
    },
    In {
        path: FieldPath,
        parameter: Parameter,
    },
    Like {
        path: FieldPath,
        parameter: Parameter,
    },
    And(Vec<Predicate>),
}

impl Predicate {
    /// Every placeholder declared in the tree, depth first.
    pub fn parameters(&self) -> Box<dyn Iterator<Item = &Parameter> + '_> {
        match self {
            Predicate::Comparison { parameter, .. }
            | Predicate::In { parameter, .. }
            | Predicate::Like { parameter, .. } => Box::new(std::iter::once(parameter)),
            Predicate::Between { from, to, .. } => Box::new([from, to].into_iter()),
            Predicate::And(children) => Box::new(children.iter().flat_map(Predicate::parameters)),
        }
    }
}

/// Stateless builder for [`Predicate`] trees.
#[derive(Debug, Clone, Copy, Default)]
pub struct CriteriaBuilder;

impl CriteriaBuilder {
    fn comparison(path: &FieldPath, comparison: Comparison, parameter: Parameter) -> Predicate {
        Predicate::Comparison {
            path: path.clone(),
            comparison,
            parameter,
        }
    }
}

impl PredicateBuilder for CriteriaBuilder {
    type Predicate = Predicate;
    type Parameter = Parameter;

    fn parameter(&self, parameter_type: ParameterType, name: &str) -> Parameter {
        Parameter::new(name, parameter_type)
    }

    fn equal(&self, path: &FieldPath, parameter: Parameter) -> Predicate {
        Self::comparison(path, Comparison::Equal, parameter)
    }

    fn not_equal(&self, path: &FieldPath, parameter: Parameter) -> Predicate {
        Self::comparison(path, Comparison::NotEqual, parameter)
    }

    fn less_than_or_equal_to(&self, path: &FieldPath, parameter: Parameter) -> Predicate {
        Self::comparison(path, Comparison::LessThanOrEqual, parameter)
    }

    fn less_than(&self, path: &FieldPath, parameter: Parameter) -> Predicate {
        Self::comparison(path, Comparison::LessThan, parameter)
    }

    fn greater_than_or_equal_to(&self, path: &FieldPath, parameter: Parameter) -> Predicate {
        Self::comparison(path, Comparison::GreaterThanOrEqual, parameter)
    }

    fn greater_than(&self, path: &FieldPath, parameter: Parameter) -> Predicate {
        Self::comparison(path, Comparison::GreaterThan, parameter)
    }

    fn between(&self, path: &FieldPath, from: Parameter, to: Parameter) -> Predicate {
        Predicate::Between {
            path: path.clone(),
            from,
            to,
        }
    }

    fn is_in(&self, path: &FieldPath, parameter: Parameter) -> Predicate {
        Predicate::In {
            path: path.clone(),
            parameter,
        }
    }

    fn like(&self, path: &FieldPath, parameter: Parameter) -> Predicate {
        Predicate::Like {
            path: path.clone(),
            parameter,
        }
    }

    fn and(&self, predicates: Vec<Predicate>) -> Predicate {
        Predicate::And(predicates)
    }
}
