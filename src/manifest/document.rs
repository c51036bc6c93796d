//! Splitting of multi-document YAML streams.

/// One YAML document of a stream, with the line it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// 1-based line of the first line of the document.
    pub line: usize,
    pub text: String,
}

impl Document {
    /// Whether the document holds nothing but blank lines, comments and directives.
    pub fn is_empty(&self) -> bool {
        self.text.lines().all(|line| {
            let line = line.trim();
            line.is_empty() || line.starts_with('#') || line.starts_with('%')
        })
    }
}

/// Split a YAML stream on `---` and `...` marker lines.
///
/// A `---` marker may carry content (`--- # comment`, `--- !tag`); anything
/// after the marker starts the new document.
pub fn split_documents(content: &str) -> Vec<Document> {
    let mut documents = Vec::new();
    let mut current = Document {
        line: 1,
        text: String::new(),
    };

    for (index, line) in content.lines().enumerate() {
        let number = index + 1;

        if let Some(rest) = start_marker(line) {
            let rest = rest.trim();
            let next = Document {
                line: if rest.is_empty() { number + 1 } else { number },
                text: String::new(),
            };
            documents.push(std::mem::replace(&mut current, next));
            if !rest.is_empty() {
                current.text.push_str(rest);
                current.text.push('\n');
            }
            continue;
        }

        if line.trim_end() == "..." {
            documents.push(std::mem::replace(
                &mut current,
                Document {
                    line: number + 1,
                    text: String::new(),
                },
            ));
            continue;
        }

        if current.text.is_empty() && line.trim().is_empty() {
            current.line = number + 1;
            continue;
        }
        current.text.push_str(line);
        current.text.push('\n');
    }
    documents.push(current);

    documents.retain(|doc| !doc.text.is_empty());
    documents
}

fn start_marker(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("---")?;
    if rest.is_empty() || rest.starts_with([' ', '\t']) {
        Some(rest)
    } else {
        None
    }
}
