use jitsig_config::{ResolverConfig, SIG_MATCH_TARGET};
use jitsig_model::{
    CandidateMember, ClassHandle, Metamodel, ParseDictionary, ResolvedSignature, TypeHandle,
    TypeOracle,
};

use crate::dictionary::lookup_dictionary_signature;
use crate::error::Result;
use crate::generics::substitute_type_variable;
use crate::matcher::match_parameters;
use crate::parts::SignatureParts;
use crate::type_list::{resolve_parameter_name, resolve_type_list};

/// Resolves signature text to declared members of a [`Metamodel`].
///
/// Holds no state of its own between calls; the only write it triggers is the
/// metamodel registering a class the first time a signature mentions it.
pub struct SignatureResolver<'a> {
    oracle: &'a dyn TypeOracle,
    metamodel: &'a dyn Metamodel,
    config: ResolverConfig,
}

impl<'a> SignatureResolver<'a> {
    pub fn new(oracle: &'a dyn TypeOracle, metamodel: &'a dyn Metamodel) -> Self {
        Self::with_config(oracle, metamodel, ResolverConfig::default())
    }

    pub fn with_config(
        oracle: &'a dyn TypeOracle,
        metamodel: &'a dyn Metamodel,
        config: ResolverConfig,
    ) -> Self {
        Self {
            oracle,
            metamodel,
            config,
        }
    }

    /// Resolves every type in `parts`, erasing type variables through its
    /// generics map first.
    pub fn resolve_signature(&self, parts: &SignatureParts) -> Result<ResolvedSignature> {
        let resolve = |name: &str| {
            let erased = substitute_type_variable(name, &parts.generics);
            resolve_parameter_name(self.oracle, &erased)
        };

        let params = parts
            .param_types
            .iter()
            .map(|name| resolve(name.as_str()))
            .collect::<Result<Vec<_>>>()?;
        let return_type = resolve(parts.return_type.as_str())?;

        Ok(ResolvedSignature {
            class_name: parts.class_name.clone(),
            member_name: parts.member_name.clone(),
            modifier: parts.modifier,
            params,
            return_type,
            generics: parts.generics.clone(),
            is_varargs: parts.is_varargs,
        })
    }

    pub fn resolve_type_list(&self, blob: &str) -> Result<Vec<TypeHandle>> {
        resolve_type_list(self.oracle, blob)
    }

    /// Whether `member` accepts `query`: exact types first, then assignable
    /// types when the configuration allows it.
    pub fn match_candidate(&self, member: &CandidateMember, query: &[TypeHandle]) -> Result<bool> {
        let declared = member
            .param_types
            .iter()
            .map(|name| resolve_parameter_name(self.oracle, name))
            .collect::<Result<Vec<_>>>()?;

        let matches =
            |exact| match_parameters(self.oracle, member.is_varargs, &declared, query, exact);
        Ok(matches(true) || (self.config.assignable_fallback && matches(false)))
    }

    /// Looks up the member named by a compilation log signature such as
    /// `java/lang/String valueOf (I)Ljava/lang/String;`.
    ///
    /// `Ok(None)` when the class cannot be loaded or declares no such member.
    pub fn find_member_with_signature(&self, line: &str) -> Result<Option<CandidateMember>> {
        let parts = SignatureParts::from_log_compilation_signature(line)?;
        self.find_member(&parts)
    }

    /// Looks up the member named by a disassembler comment, e.g.
    /// `Method java/lang/String.valueOf:(I)Ljava/lang/String;`.
    ///
    /// Comments for members of the class being disassembled omit the owner
    /// (`Method length:()I`); `current_class` fills it in.
    pub fn member_from_bytecode_comment(
        &self,
        current_class: Option<&str>,
        comment: &str,
    ) -> Result<Option<CandidateMember>> {
        let reference = self.config.strip_comment_prefix(comment);
        let member_ref = reference.split(':').next().unwrap_or(reference);

        let qualified;
        let reference = match current_class {
            Some(class) if !member_ref.contains('.') => {
                qualified = format!("{}.{reference}", class.replace('.', "/"));
                qualified.as_str()
            }
            _ => reference,
        };

        let parts = SignatureParts::from_bytecode_comment(reference)?;
        self.find_member(&parts)
    }

    /// Resolves a method id of a structured log's dictionary.
    ///
    /// Every miss along the way (unknown ids, a class that cannot be loaded,
    /// an unknown type, no matching member) is logged and yields `None`.
    pub fn resolve_dictionary_member(
        &self,
        dict: &dyn ParseDictionary,
        method_id: &str,
    ) -> Option<CandidateMember> {
        let sig = lookup_dictionary_signature(dict, method_id)?;
        let parts = SignatureParts::from_parts(
            &sig.class_name,
            &sig.member_name,
            &sig.return_type,
            &sig.arg_types,
        );

        match self.find_member(&parts) {
            Ok(member) => member,
            Err(err) => {
                tracing::debug!(method_id, error = %err, "could not resolve dictionary member");
                None
            }
        }
    }

    fn find_member(&self, parts: &SignatureParts) -> Result<Option<CandidateMember>> {
        if self.ensure_class(&parts.class_name).is_none() {
            return Ok(None);
        }

        let resolved = self.resolve_signature(parts)?;
        let member = self.metamodel.find_member(&resolved, true).or_else(|| {
            if !self.config.assignable_fallback {
                return None;
            }
            tracing::trace!(
                target: SIG_MATCH_TARGET,
                class = %parts.class_name,
                member = %parts.member_name,
                "no exact match, retrying with assignability"
            );
            self.metamodel.find_member(&resolved, false)
        });
        if member.is_none() {
            tracing::debug!(
                target: SIG_MATCH_TARGET,
                class = %parts.class_name,
                member = %parts.member_name,
                params = ?parts.param_types,
                "no declared member matches"
            );
        }
        Ok(member)
    }

    fn ensure_class(&self, class_name: &str) -> Option<ClassHandle> {
        if let Some(handle) = self.metamodel.find_class(class_name) {
            return Some(handle);
        }

        tracing::debug!(class = class_name, "class not in metamodel, loading");
        match self.metamodel.get_or_register_class(class_name) {
            Ok(handle) => Some(handle),
            Err(err) => {
                tracing::error!(class = class_name, error = %err, "could not register class");
                None
            }
        }
    }
}

impl std::fmt::Debug for SignatureResolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureResolver")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::metamodel::MemoryMetamodel;
    use jitsig_model::MemoryTypeOracle;
    use pretty_assertions::assert_eq;

    fn fixture() -> (Arc<MemoryTypeOracle>, MemoryMetamodel) {
        let oracle = Arc::new(MemoryTypeOracle::with_minimal_jdk());
        let metamodel = MemoryMetamodel::from_oracle(oracle.clone());
        (oracle, metamodel)
    }

    #[test]
    fn resolve_signature_erases_type_variables() {
        let (oracle, metamodel) = fixture();
        let resolver = SignatureResolver::new(oracle.as_ref(), &metamodel);

        let parts = SignatureParts::from_bytecode_signature(
            "java.util.Arrays",
            "public static <T extends java.lang.Object, U extends java.lang.Object> T[] copyOf(U[], int, java.lang.Class<? extends T[]>);",
        )
        .unwrap();
        let resolved = resolver.resolve_signature(&parts).unwrap();

        let names: Vec<String> = resolved.params.iter().map(TypeHandle::name).collect();
        assert_eq!(names, vec!["java.lang.Object[]", "int", "java.lang.Class"]);
        assert_eq!(resolved.return_type.name(), "java.lang.Object[]");
    }

    #[test]
    fn match_candidate_honours_the_fallback_setting() {
        let (oracle, metamodel) = fixture();
        let member = CandidateMember {
            class_name: "java.lang.String".to_string(),
            name: "valueOf".to_string(),
            modifier: 0,
            param_types: vec!["java.lang.Object".to_string()],
            return_type: "java.lang.String".to_string(),
            is_varargs: false,
        };
        let query = resolve_type_list(oracle.as_ref(), "(java.lang.Integer)").unwrap();

        let resolver = SignatureResolver::new(oracle.as_ref(), &metamodel);
        assert_eq!(resolver.match_candidate(&member, &query), Ok(true));

        let strict = ResolverConfig {
            assignable_fallback: false,
            ..ResolverConfig::default()
        };
        let resolver = SignatureResolver::with_config(oracle.as_ref(), &metamodel, strict);
        assert_eq!(resolver.match_candidate(&member, &query), Ok(false));
    }

    #[test]
    fn member_lookups_honour_the_fallback_setting() {
        let (oracle, metamodel) = fixture();
        let line = "java.lang.String valueOf (java.lang.Integer)java.lang.String";

        let resolver = SignatureResolver::new(oracle.as_ref(), &metamodel);
        let member = resolver.find_member_with_signature(line).unwrap().unwrap();
        assert_eq!(member.param_types, vec!["java.lang.Object".to_string()]);

        let strict = ResolverConfig {
            assignable_fallback: false,
            ..ResolverConfig::default()
        };
        let resolver = SignatureResolver::with_config(oracle.as_ref(), &metamodel, strict);
        assert_eq!(resolver.find_member_with_signature(line), Ok(None));

        let exact = resolver
            .find_member_with_signature("java.lang.String valueOf (int)java.lang.String")
            .unwrap()
            .unwrap();
        assert_eq!(exact.param_types, vec!["int".to_string()]);
    }

    #[test]
    fn comments_without_an_owner_use_the_current_class() {
        let (oracle, metamodel) = fixture();
        let resolver = SignatureResolver::new(oracle.as_ref(), &metamodel);

        let member = resolver
            .member_from_bytecode_comment(Some("java.lang.String"), "Method length:()I")
            .unwrap()
            .unwrap();
        assert_eq!(member.class_name, "java.lang.String");
        assert_eq!(member.name, "length");

        assert!(resolver
            .member_from_bytecode_comment(None, "Method length:()I")
            .is_err());
    }

    #[test]
    fn unknown_classes_are_misses_not_errors() {
        let (oracle, metamodel) = fixture();
        let resolver = SignatureResolver::new(oracle.as_ref(), &metamodel);
        assert_eq!(
            resolver.find_member_with_signature("com.example.Missing run ()V"),
            Ok(None)
        );
        assert_eq!(metamodel.class_count(), 0);
    }
}
