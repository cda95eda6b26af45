// Output transforms and source inspection

/// Render program output as a Java string-concatenation literal.
///
/// Each line becomes a quoted literal with `"` escaped, and lines are
/// joined with `+ "\n" +`, so `a\nb` turns into `"a" + "\n" + "b"`.
pub fn to_string_literal(output: &str) -> String {
    if output.is_empty() {
        return String::new();
    }

    output
        .split('\n')
        .map(|line| format!("\"{}\"", line.replace('"', "\\\"")))
        .collect::<Vec<_>>()
        .join(" + \"\\n\" + ")
}

/// Name of the first `public class` declared in `source`
pub fn infer_class_name(source: &str) -> Option<String> {
    let mut tokens = source.split_whitespace();

    while let Some(token) = tokens.next() {
        if token != "public" {
            continue;
        }
        // Skip modifiers between `public` and `class`
        while let Some(next) = tokens.next() {
            match next {
                "final" | "abstract" | "static" | "strictfp" => continue,
                "class" => {
                    let name = tokens.next()?;
                    let name: String = name
                        .chars()
                        .take_while(|c| c.is_alphanumeric() || *c == '_' || *c == '$')
                        .collect();
                    return (!name.is_empty()).then_some(name);
                }
                _ => break,
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_string_literal_empty() {
        assert_eq!(to_string_literal(""), "");
    }

    #[test]
    fn test_to_string_literal_lines_and_quotes() {
        let out = "Hello, \"World\"!\nsecond";
        assert_eq!(
            to_string_literal(out),
            r#""Hello, \"World\"!" + "\n" + "second""#
        );
    }

    #[test]
    fn test_to_string_literal_trailing_newline_keeps_empty_line() {
        assert_eq!(to_string_literal("a\n"), r#""a" + "\n" + """#);
    }

    #[test]
    fn test_infer_class_name() {
        let src = "import java.util.*;\n\npublic final class Main{\n}";
        assert_eq!(infer_class_name(src).as_deref(), Some("Main"));

        let src = "class Helper {}\npublic class App extends Base {}";
        assert_eq!(infer_class_name(src).as_deref(), Some("App"));

        assert_eq!(infer_class_name("class Hidden {}"), None);
    }
}
