pub const DEFAULT_LANGUAGE_COLOR: &str = "#6c757d";

/// Display color for a primary language, as shown on the language chart.
pub fn language_color(language: &str) -> &'static str {
    let colors: &[(&str, &str)] = &[
        ("JavaScript", "#f7df1e"),
        ("TypeScript", "#3178c6"),
        ("HTML", "#e34c26"),
        ("CSS", "#563d7c"),
        ("Python", "#3572A5"),
        ("Java", "#b07219"),
        ("PHP", "#4F5D95"),
        ("Ruby", "#701516"),
        ("C#", "#178600"),
        ("C++", "#f34b7d"),
        ("C", "#555555"),
        ("Go", "#00ADD8"),
        ("Swift", "#F05138"),
        ("Kotlin", "#A97BFF"),
        ("Rust", "#DEA584"),
        ("Dart", "#00B4AB"),
        ("Elixir", "#6e4a7e"),
        ("Haskell", "#5e5086"),
        ("Jupyter", "#DA5B0B"),
    ];

    colors
        .iter()
        .find(|(name, _)| *name == language)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_LANGUAGE_COLOR)
}
