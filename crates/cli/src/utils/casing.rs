//! Identifier casing for generated code

/// Split an identifier into words on `_`, `-`, whitespace and lower-to-upper boundaries.
///
/// Runs of capitals stay together (`HTTPServer` → `HTTP`, `Server`).
fn words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

fn decapitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
    }
}

/// Convert to PascalCase (`user_login` → `UserLogin`, `auth` → `Auth`).
pub fn to_pascal_case(s: &str) -> String {
    words(s).iter().map(|w| capitalize(w)).collect()
}

/// Convert to camelCase (`UserLogin` → `userLogin`, `get-user` → `getUser`).
pub fn to_camel_case(s: &str) -> String {
    let words = words(s);
    let mut iter = words.iter();
    let Some(first) = iter.next() else {
        return String::new();
    };
    // An all-caps leading word is an initialism: lower it entirely (`HTTPServer` → `httpServer`).
    let head = if first.chars().all(|c| !c.is_lowercase()) {
        first.to_lowercase()
    } else {
        decapitalize(first)
    };
    head + &iter.map(|w| capitalize(w)).collect::<String>()
}
