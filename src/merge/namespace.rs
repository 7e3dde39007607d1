//! Namespace qualification of task names

/// Separates a namespace from the task name inside it
pub const NAMESPACE_SEPARATOR: char = ':';

/// Qualify a task name with a namespace
///
/// A name that starts with the separator escapes namespacing: exactly one
/// leading separator is stripped and the rest is returned as is, so included
/// files can refer to tasks of the root taskfile.
pub fn task_name_with_namespace(task_name: &str, namespace: &str) -> String {
    match task_name.strip_prefix(NAMESPACE_SEPARATOR) {
        Some(unqualified) => unqualified.to_string(),
        None => format!("{}{}{}", namespace, NAMESPACE_SEPARATOR, task_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualifies_plain_name() {
        assert_eq!(task_name_with_namespace("build", "api"), "api:build");
    }

    #[test]
    fn test_qualifies_already_namespaced_name() {
        assert_eq!(task_name_with_namespace("db:migrate", "api"), "api:db:migrate");
    }

    #[test]
    fn test_leading_separator_escapes() {
        assert_eq!(task_name_with_namespace(":shared", "api"), "shared");
        assert_eq!(task_name_with_namespace(":db:migrate", "api"), "db:migrate");
    }

    #[test]
    fn test_only_one_separator_is_stripped() {
        assert_eq!(task_name_with_namespace("::root", "api"), ":root");
    }
}
