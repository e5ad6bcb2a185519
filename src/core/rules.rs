//! Label rewrite rules.
//!
//! The migration is an ordered table of (predicate, transform) pairs
//! over single lines of compose-file text. Every predicate is a literal
//! substring test; the first matching rule wins and a line is
//! transformed at most once per pass. No transform's output is matched
//! by an earlier rule, so repeated runs converge instead of
//! compounding.

use crate::error::{Error, Result};

/// How a matching line is transformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleAction {
    /// Comment the whole line out, preserving its indentation.
    CommentOut,
    /// Replace the matched substring, leaving the rest of the line alone.
    Substitute { to: &'static str },
    /// Rebuild the line as a `- key=value` list item. The value is the
    /// segment between the first and second `=`, trimmed; with
    /// `strip_quotes` every literal `"` is removed from it as well.
    Relabel {
        key: &'static str,
        strip_quotes: bool,
    },
}

/// A single rewrite rule: a literal needle plus the transformation
/// applied when a line contains it.
#[derive(Debug, Clone, Copy)]
pub struct RewriteRule {
    pub name: &'static str,
    pub needle: &'static str,
    pub action: RuleAction,
}

/// The migration rule table, highest priority first.
pub const RULES: &[RewriteRule] = &[
    RewriteRule {
        name: "comment-host-rule",
        needle: ".rule=Host(`",
        action: RuleAction::CommentOut,
    },
    RewriteRule {
        name: "traefik-enable",
        needle: "traefik.enable=true",
        action: RuleAction::Substitute {
            to: "lostack.enable=true",
        },
    },
    RewriteRule {
        name: "sablier-enable",
        needle: "sablier.enable=true",
        action: RuleAction::Substitute {
            to: "lostack.enable_sablier=true",
        },
    },
    RewriteRule {
        name: "sablier-group",
        needle: "sablier.group",
        action: RuleAction::Substitute {
            to: "lostack.group",
        },
    },
    RewriteRule {
        name: "server-port",
        needle: "server.port",
        action: RuleAction::Relabel {
            key: "lostack.port",
            strip_quotes: false,
        },
    },
    RewriteRule {
        name: "default-duration",
        needle: "lostack.duration",
        action: RuleAction::Substitute {
            to: "lostack.default_duration",
        },
    },
    RewriteRule {
        name: "autostart",
        needle: "lostack.enable_sablier",
        action: RuleAction::Substitute {
            to: "lostack.autostart",
        },
    },
    RewriteRule {
        name: "normalize-port",
        needle: "lostack.port",
        action: RuleAction::Relabel {
            key: "lostack.port",
            strip_quotes: true,
        },
    },
];

/// Split a line into its leading whitespace and the rest.
fn split_indent(line: &str) -> (&str, &str) {
    let stripped = line.trim_start();
    let indent = &line[..line.len() - stripped.len()];
    (indent, stripped)
}

impl RewriteRule {
    /// Whether this rule applies to `line`.
    pub fn matches(&self, line: &str) -> bool {
        if !line.contains(self.needle) {
            return false;
        }
        match self.action {
            // Never re-comment a line that is already commented.
            RuleAction::CommentOut => !line.trim_start().starts_with('#'),
            _ => true,
        }
    }

    /// Transform `line`. Only valid when `matches` returned true.
    pub fn apply(&self, line: &str) -> Result<String> {
        match self.action {
            RuleAction::CommentOut => {
                let (indent, stripped) = split_indent(line);
                Ok(format!("{}# {}", indent, stripped))
            }
            RuleAction::Substitute { to } => Ok(line.replace(self.needle, to)),
            RuleAction::Relabel { key, strip_quotes } => {
                // Segment between the first and second '=', like the
                // label values these lines carry. No '=' at all makes
                // the line unparseable.
                let value = line
                    .split('=')
                    .nth(1)
                    .ok_or_else(|| Error::rewrite_value_missing(line.trim_end()))?;
                let value = value.trim();
                let value = if strip_quotes {
                    value.replace('"', "")
                } else {
                    value.to_string()
                };
                let (indent, _) = split_indent(line);
                Ok(format!("{}- {}={}\n", indent, key, value))
            }
        }
    }
}

/// Apply the first matching rule to one line.
///
/// Returns `None` when no rule matches; the caller copies the line
/// through unchanged.
pub fn rewrite_line(line: &str) -> Result<Option<String>> {
    for rule in RULES {
        if rule.matches(line) {
            return rule.apply(line).map(Some);
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite(line: &str) -> Option<String> {
        rewrite_line(line).unwrap()
    }

    #[test]
    fn host_rule_is_commented_out_with_indent_preserved() {
        let line = "    - \"traefik.frontend.rule=Host(`app.example.com`)\"\n";
        assert_eq!(
            rewrite(line).unwrap(),
            "    # - \"traefik.frontend.rule=Host(`app.example.com`)\"\n"
        );
    }

    #[test]
    fn already_commented_host_rule_is_left_alone() {
        let line = "    # - \"traefik.frontend.rule=Host(`app.example.com`)\"\n";
        assert_eq!(rewrite(line), None);
    }

    #[test]
    fn traefik_enable_is_renamed() {
        let line = "      - traefik.enable=true\n";
        assert_eq!(rewrite(line).unwrap(), "      - lostack.enable=true\n");
    }

    #[test]
    fn sablier_enable_is_renamed() {
        let line = "      - sablier.enable=true\n";
        assert_eq!(
            rewrite(line).unwrap(),
            "      - lostack.enable_sablier=true\n"
        );
    }

    #[test]
    fn sablier_group_keeps_rest_of_line() {
        let line = "      - sablier.group=media\n";
        assert_eq!(rewrite(line).unwrap(), "      - lostack.group=media\n");
    }

    #[test]
    fn server_port_becomes_lostack_port_list_item() {
        let line = "      - server.port=8080\n";
        assert_eq!(rewrite(line).unwrap(), "      - lostack.port=8080\n");
    }

    #[test]
    fn server_port_without_newline_gains_one() {
        let line = "      - server.port=8080";
        assert_eq!(rewrite(line).unwrap(), "      - lostack.port=8080\n");
    }

    #[test]
    fn server_port_keeps_quotes() {
        let line = "      - server.port=\"8080\"\n";
        assert_eq!(rewrite(line).unwrap(), "      - lostack.port=\"8080\"\n");
    }

    #[test]
    fn server_port_value_is_segment_between_first_and_second_equals() {
        let line = "      - server.port=\"8080=x\"\n";
        // split on '=' and take the second segment, like the original
        // key=value parse: everything after a second '=' is dropped.
        assert_eq!(rewrite(line).unwrap(), "      - lostack.port=\"8080\n");
    }

    #[test]
    fn server_port_without_equals_is_an_error() {
        let line = "      - server.port\n";
        let err = rewrite_line(line).unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::RewriteValueMissing);
    }

    #[test]
    fn quoted_lostack_port_is_unquoted() {
        let line = "      - lostack.port=\"9090\"\n";
        assert_eq!(rewrite(line).unwrap(), "      - lostack.port=9090\n");
    }

    #[test]
    fn duration_is_renamed_within_namespace() {
        let line = "      - lostack.duration=10m\n";
        assert_eq!(
            rewrite(line).unwrap(),
            "      - lostack.default_duration=10m\n"
        );
    }

    #[test]
    fn enable_sablier_is_renamed_to_autostart() {
        let line = "      - lostack.enable_sablier=true\n";
        assert_eq!(rewrite(line).unwrap(), "      - lostack.autostart=true\n");
    }

    #[test]
    fn unrelated_lines_pass_through() {
        assert_eq!(rewrite("services:\n"), None);
        assert_eq!(rewrite("  app:\n"), None);
        assert_eq!(rewrite("    image: nginx:latest\n"), None);
        assert_eq!(rewrite(""), None);
    }

    #[test]
    fn host_rule_wins_over_flag_rename() {
        // A line matching both the host-rule needle and a flag needle is
        // only commented out, never additionally renamed.
        let line = "  - traefik.enable=true.rule=Host(`x`)\n";
        assert_eq!(
            rewrite(line).unwrap(),
            "  # - traefik.enable=true.rule=Host(`x`)\n"
        );
    }

    #[test]
    fn sablier_enable_wins_over_group_rename() {
        // "sablier.enable=true" sits earlier in the table than
        // "sablier.group"; a line with both only gets the first rewrite.
        let line = "      - sablier.enable=true # sablier.group=media\n";
        assert_eq!(
            rewrite(line).unwrap(),
            "      - lostack.enable_sablier=true # sablier.group=media\n"
        );
    }

    #[test]
    fn rule_outputs_are_fixed_points() {
        let inputs = [
            "    - \"traefik.frontend.rule=Host(`app.example.com`)\"\n",
            "      - traefik.enable=true\n",
            "      - sablier.group=media\n",
            "      - server.port=8080\n",
            "      - lostack.duration=10m\n",
            "      - lostack.enable_sablier=true\n",
            "      - lostack.port=\"9090\"\n",
            "    image: nginx:latest\n",
        ];

        for input in inputs {
            let once = rewrite(input).unwrap_or_else(|| input.to_string());
            let twice = rewrite(&once).unwrap_or_else(|| once.clone());
            assert_eq!(once, twice, "second pass changed output of {:?}", input);
        }
    }

    #[test]
    fn sablier_enable_converges_via_the_staged_rename() {
        // sablier.enable first becomes the intermediate flag name, which
        // the autostart rule finishes migrating on a later pass. After
        // that the line is stable.
        let line = "      - sablier.enable=true\n";
        let once = rewrite(line).unwrap();
        assert_eq!(once, "      - lostack.enable_sablier=true\n");
        let twice = rewrite(&once).unwrap();
        assert_eq!(twice, "      - lostack.autostart=true\n");
        assert_eq!(rewrite(&twice), None);
    }
}
