/// Double-quotes an SQL identifier so that names pass through with their exact
/// spelling and case. Embedded quotes are doubled.
pub(crate) fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
