/// Converts a component name into the kebab-case form Storyblok uses for block names.
///
/// A hyphen is inserted wherever an ASCII lowercase letter is directly followed by an
/// ASCII uppercase letter, runs of whitespace or underscores collapse into a single
/// hyphen, and the result is lowercased. Existing hyphens are kept as they are.
///
/// # Examples
///
/// ```
/// use blokify_core::case::to_kebab_case;
///
/// assert_eq!(to_kebab_case("PrimaryButton"), "primary-button");
/// assert_eq!(to_kebab_case("Hero Banner"), "hero-banner");
/// assert_eq!(to_kebab_case("sb_Card"), "sb-card");
/// ```
pub fn to_kebab_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    let mut prev: Option<char> = None;
    let mut in_separator = false;

    for ch in text.chars() {
        if ch.is_whitespace() || ch == '_' {
            if !in_separator {
                out.push('-');
                in_separator = true;
            }
            prev = Some(ch);
            continue;
        }
        in_separator = false;

        if ch.is_ascii_uppercase() && prev.is_some_and(|p| p.is_ascii_lowercase()) {
            out.push('-');
        }
        out.extend(ch.to_lowercase());
        prev = Some(ch);
    }

    out
}

/// Removes every whitespace character while keeping the original casing.
///
/// Used for component ids in spaces that name their blocks in PascalCase.
pub fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|ch| !ch.is_whitespace()).collect()
}

/// Builds a human-readable display name by putting a space before each
/// ASCII uppercase letter and trimming the result.
///
/// ```
/// use blokify_core::case::spaced_display_name;
///
/// assert_eq!(spaced_display_name("HeroBanner"), "Hero Banner");
/// ```
pub fn spaced_display_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push(' ');
        }
        out.push(ch);
    }
    out.trim().to_string()
}

/// Upper-cases the first character of an option value to form its label.
pub fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercases a component name and joins whitespace runs with hyphens, producing
/// the path segment of a Storybook docs URL.
pub fn docs_path_segment(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut in_whitespace = false;
    for ch in lowered.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push('-');
                in_whitespace = true;
            }
        } else {
            in_whitespace = false;
            out.push(ch);
        }
    }
    out
}
