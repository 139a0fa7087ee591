//! camelCase ⇄ snake_case identifier conversion
//!
//! Both functions are total over any `&str`: only ASCII letters and
//! underscores take part in the conversion, everything else is copied
//! through unchanged.
//!
//! The two directions are inverses for identifiers that do not already mix
//! the conventions (a camelCase name holding `_` before a lower-case letter):
//!
//! ```rust
//! use caserpc_core::case::{camel_to_snake, snake_to_camel};
//!
//! assert_eq!(camel_to_snake("perSwimlaneTaskLimits"), "per_swimlane_task_limits");
//! assert_eq!(snake_to_camel("per_swimlane_task_limits"), "perSwimlaneTaskLimits");
//! assert_eq!(snake_to_camel(&camel_to_snake("userID")), "userID");
//! assert_eq!(camel_to_snake("TaskId"), "Task_id");
//! assert_eq!(snake_to_camel("Task_id"), "TaskId");
//! ```

/// Convert a camelCase identifier to snake_case.
///
/// The head of the string (any leading underscores and the first character
/// after them) is copied as is. Every later ASCII upper-case letter is
/// lower-cased and prefixed with an underscore. Input without upper-case
/// letters past the head is returned unchanged.
pub fn camel_to_snake(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + input.len() / 4);
    let mut in_head = true;

    for c in input.chars() {
        if in_head {
            in_head = c == '_';
            out.push(c);
        } else if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}

/// Convert a snake_case identifier to camelCase.
///
/// An underscore followed by an ASCII lower-case letter is dropped and the
/// letter upper-cased. Leading underscores, and underscores followed by
/// anything else, are kept.
pub fn snake_to_camel(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut leading = true;

    while let Some(c) = chars.next() {
        if c == '_' && !leading {
            if let Some(next) = chars.peek().copied().filter(char::is_ascii_lowercase) {
                chars.next();
                out.push(next.to_ascii_uppercase());
                continue;
            }
        }
        leading = leading && c == '_';
        out.push(c);
    }

    out
}
