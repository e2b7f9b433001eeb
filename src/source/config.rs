/// Label patterns are case-insensitive substrings of property names. The
/// first property (in file order) that matches any pattern supplies the label.
pub struct Config {
    pub route_label_patterns: Vec<String>,
    pub stop_label_patterns: Vec<String>,
    pub file_extensions: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            route_label_patterns: vec![
                "via".into(),
                "name".into(),
                "descripcion".into(),
                "route".into(),
            ],
            stop_label_patterns: vec!["paradero".into(), "name".into(), "descripcion".into()],
            file_extensions: vec!["geojson".into(), "json".into()],
        }
    }
}

impl Config {
    pub(crate) fn accepts_extension(&self, extension: &str) -> bool {
        self.file_extensions
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(extension))
    }
}
