use jitsig_config::SIG_MATCH_TARGET;
use jitsig_model::{TypeHandle, TypeOracle};

/// Decides whether a declared parameter list accepts a query parameter list.
///
/// Both lists are walked from the end, since a varargs slot can only be the
/// last declared parameter. That slot accepts its own array type, or absorbs
/// any number of trailing query parameters of its component type (zero
/// included), leaving enough arguments for the fixed parameters before it.
/// Every other declared parameter must be consumed by exactly one query
/// parameter.
///
/// With `exact` set, types must be identical; otherwise the declared type
/// only has to be assignable from the query type.
pub fn match_parameters(
    oracle: &dyn TypeOracle,
    candidate_is_varargs: bool,
    candidate_params: &[TypeHandle],
    query_params: &[TypeHandle],
    exact: bool,
) -> bool {
    tracing::trace!(
        target: SIG_MATCH_TARGET,
        candidate_count = candidate_params.len(),
        query_count = query_params.len(),
        varargs = candidate_is_varargs,
        exact,
        "matching parameters"
    );

    if !candidate_is_varargs && candidate_params.len() != query_params.len() {
        return false;
    }

    let accepts = |declared: &TypeHandle, actual: &TypeHandle| {
        if exact {
            declared == actual
        } else {
            oracle.is_assignable(actual, declared)
        }
    };

    let varargs_slot = if candidate_is_varargs {
        candidate_params.len().checked_sub(1)
    } else {
        None
    };

    // Number of declared / query parameters not consumed yet.
    let mut declared_left = candidate_params.len();
    let mut query_left = query_params.len();
    // Once the varargs slot has absorbed an argument it no longer takes its
    // array type as a whole.
    let mut absorbed = false;

    while query_left > 0 {
        let Some(slot) = declared_left.checked_sub(1) else {
            tracing::trace!(
                target: SIG_MATCH_TARGET,
                query_left,
                "more query parameters than declared parameters"
            );
            return false;
        };
        let declared = &candidate_params[slot];
        let actual = &query_params[query_left - 1];
        let in_varargs_slot = varargs_slot == Some(slot);

        if !(in_varargs_slot && absorbed) && accepts(declared, actual) {
            tracing::trace!(target: SIG_MATCH_TARGET, %declared, %actual, "parameter matched");
            declared_left -= 1;
            query_left -= 1;
            continue;
        }

        if in_varargs_slot {
            // The `slot` fixed parameters before the varargs slot each need
            // an argument of their own.
            let absorbs = query_left > slot
                && oracle
                    .component_type(declared)
                    .is_some_and(|component| accepts(&component, actual));
            if absorbs {
                tracing::trace!(target: SIG_MATCH_TARGET, %declared, %actual, "absorbed by varargs");
                absorbed = true;
                query_left -= 1;
            } else {
                // The varargs slot is done; retry this argument one slot earlier.
                declared_left -= 1;
            }
            continue;
        }

        tracing::trace!(target: SIG_MATCH_TARGET, %declared, %actual, "parameter mismatch");
        return false;
    }

    // Only an empty varargs slot may be left over.
    declared_left == 0 || (declared_left == 1 && varargs_slot == Some(0))
}
