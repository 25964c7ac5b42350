use jitsig_descriptor::{expand_descriptor, PrimitiveKind, TypeDescriptor};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const PROPTEST_CASES: u32 = 256;

fn arb_primitive() -> impl Strategy<Value = PrimitiveKind> {
    prop::sample::select(PrimitiveKind::all().collect::<Vec<_>>())
}

fn arb_segment() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9_]{0,6}"
}

fn arb_class_name() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_segment(), 1..=4).prop_map(|segments| segments.join("."))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(PROPTEST_CASES))]

    #[test]
    fn primitive_arrays_expand_with_one_pair_per_dimension(
        kind in arb_primitive(),
        depth in 0usize..6,
    ) {
        let token = format!("{}{}", "[".repeat(depth), kind.code());
        let expected = format!("{}{}", kind.name(), "[]".repeat(depth));
        prop_assert_eq!(expand_descriptor(&token), expected);
    }

    #[test]
    fn reference_arrays_expand_to_the_verbatim_name(
        name in arb_class_name(),
        depth in 0usize..4,
    ) {
        let token = format!("{}L{};", "[".repeat(depth), name);
        let expected = format!("{}{}", name, "[]".repeat(depth));
        prop_assert_eq!(expand_descriptor(&token), expected);
    }

    #[test]
    fn expansion_agrees_with_descriptor_rendering(
        name in arb_class_name(),
        depth in 1usize..4,
    ) {
        let ty = TypeDescriptor::array(TypeDescriptor::reference(name), depth);
        prop_assert_eq!(expand_descriptor(&ty.to_binary_name()), ty.to_string());
    }
}

#[test]
fn expanded_names_are_stable_under_re_expansion() {
    for token in ["[I", "[[Ljava.lang.String;", "java.util.List", "[[[D"] {
        let once = expand_descriptor(token);
        assert_eq!(expand_descriptor(&once), once);
    }
}
