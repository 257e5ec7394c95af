//! Browser UI: one text input, one button, and the generated suggestions.
//!
//! Pages are rendered server-side with minijinja. Templates end in `.html`,
//! so user text is auto-escaped.

use axum::{extract::State, response::Html, Form};
use minijinja::{context, Environment};
use serde::Deserialize;

use crate::errors::AppError;
use crate::generation::generator::generate_professions;
use crate::state::AppState;

const INDEX_TEMPLATE_NAME: &str = "index.html";

const INDEX_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Professions Generator</title>
</head>
<body>
  <h1>Professions Generator</h1>
  <form method="post" action="/">
    <label for="traits">Enter traits and/or skills:</label>
    <input type="text" id="traits" name="traits" value="{{ traits }}">
    <button type="submit">Generate</button>
  </form>
  {%- if professions is not none %}
  <h3>Generated Professions:</h3>
  {%- for profession in professions %}
  <p class="profession">{{ profession }}</p>
  {%- endfor %}
  {%- endif %}
</body>
</html>
"#;

/// Builds the template environment once at startup.
pub fn page_environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template(INDEX_TEMPLATE_NAME, INDEX_TEMPLATE)?;
    Ok(env)
}

/// `None` renders the empty form; `Some` adds the results section, even when empty.
pub fn render_index(
    env: &Environment<'_>,
    traits: &str,
    professions: Option<&[String]>,
) -> Result<String, AppError> {
    let page = env.get_template(INDEX_TEMPLATE_NAME)?.render(context! {
        traits => traits,
        professions => professions,
    })?;
    Ok(page)
}

#[derive(Debug, Deserialize)]
pub struct TraitsForm {
    #[serde(default)]
    pub traits: String,
}

/// GET /
pub async fn handle_index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    Ok(Html(render_index(&state.pages, "", None)?))
}

/// POST /
///
/// Form submit from the Generate button. A backend failure is returned as the
/// JSON error response; there is no partial page.
pub async fn handle_generate_form(
    State(state): State<AppState>,
    Form(form): Form<TraitsForm>,
) -> Result<Html<String>, AppError> {
    let professions = generate_professions(state.generator.as_ref(), &form.traits).await?;
    Ok(Html(render_index(
        &state.pages,
        &form.traits,
        Some(&professions),
    )?))
}
