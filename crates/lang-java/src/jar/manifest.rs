//! Jar manifest parsing (main section only).

pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";
pub const AUTOMATIC_MODULE_NAME: &str = "Automatic-Module-Name";
pub const MULTI_RELEASE: &str = "Multi-Release";

/// Main attributes of a jar manifest, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    main: Vec<(String, String)>,
}

impl Manifest {
    /// Parses the main section. Per-entry sections after the first blank
    /// line are ignored, as are lines that are not `Name: value` headers.
    pub fn parse(bytes: &[u8]) -> Self {
        let text = String::from_utf8_lossy(bytes);
        let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
        let text = text.replace("\r\n", "\n").replace('\r', "\n");

        let mut main: Vec<(String, String)> = Vec::new();
        for line in text.split('\n') {
            if line.is_empty() {
                if main.is_empty() {
                    continue;
                }
                break;
            }

            // Continuation of the previous value
            if let Some(rest) = line.strip_prefix(' ') {
                if let Some((_, value)) = main.last_mut() {
                    value.push_str(rest);
                }
                continue;
            }

            if let Some((name, value)) = line.split_once(':') {
                let name = name.trim();
                if name.is_empty() {
                    continue;
                }
                let value = value.strip_prefix(' ').unwrap_or(value);
                main.push((name.to_string(), value.to_string()));
            }
        }

        Self { main }
    }

    /// Case-insensitive lookup of a main attribute. The first declaration wins.
    pub fn main_attribute(&self, name: &str) -> Option<&str> {
        self.main
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Trimmed `Automatic-Module-Name`, if present and non-empty.
    pub fn automatic_module_name(&self) -> Option<&str> {
        self.main_attribute(AUTOMATIC_MODULE_NAME)
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    pub fn is_multi_release(&self) -> bool {
        self.main_attribute(MULTI_RELEASE)
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
    }
}
