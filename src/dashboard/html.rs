//! Dashboard page template.
//!
//! One page, no assets: a vehicle-type dropdown and two chart panes whose
//! `<img>` sources point at the SVG chart routes. Selection changes only
//! swap the image URLs; all recomputation happens server-side.

/// Render the dashboard page for the given vehicle types and the currently
/// selected one.
pub fn render_page(vehicle_types: &[String], selected: &str) -> String {
    let options: String = vehicle_types
        .iter()
        .map(|vt| {
            let sel = if vt == selected { " selected" } else { "" };
            format!(
                "<option value=\"{}\"{sel}>{}</option>",
                escape(vt),
                escape(vt)
            )
        })
        .collect();

    let selected_query = urlencode(selected);

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Automobile Sales Dashboard</title>
<style>
  body {{ font-family: sans-serif; margin: 2rem; }}
  h1 {{ text-align: center; }}
  .pane {{ margin-top: 20px; }}
  img {{ max-width: 100%; border: 1px solid #ddd; }}
  select {{ font-size: 1rem; padding: 4px; }}
</style>
</head>
<body>
<h1>Automobile Sales Dashboard</h1>
<label for="vehicle-type">Vehicle type:</label>
<select id="vehicle-type">{options}</select>
<div class="pane"><img id="recession-chart" src="/chart/recession?vehicle={selected_query}" alt="Recession sales trend"></div>
<div class="pane"><img id="yearly-chart" src="/chart/yearly?vehicle={selected_query}" alt="Yearly sales trend"></div>
<script>
  const dropdown = document.getElementById('vehicle-type');
  dropdown.addEventListener('change', () => {{
    const v = encodeURIComponent(dropdown.value);
    document.getElementById('recession-chart').src = '/chart/recession?vehicle=' + v;
    document.getElementById('yearly-chart').src = '/chart/yearly?vehicle=' + v;
  }});
</script>
</body>
</html>
"#
    )
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Minimal percent-encoding for query values (covers the characters a
/// vehicle-type category can realistically contain).
pub fn urlencode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

/// Decode a percent-encoded query value (`+` treated as space).
///
/// Works on raw bytes throughout: a `%` not followed by two hex digits
/// (including one followed by a multibyte character) is kept literally
/// rather than slicing into the middle of a UTF-8 sequence.
pub fn urldecode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => {
                let hi = bytes.get(i + 1).copied().and_then(hex_val);
                let lo = bytes.get(i + 2).copied().and_then(hex_val);
                match (hi, lo) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi * 16 + lo);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
