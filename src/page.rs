use crate::table::ReturnField;

pub const PAGE_TITLE: &str = "DFIC Return Performance Dashboard";
pub const SELECTOR_LABEL: &str = "Select Return Types:";
const PLOTLY_JS: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>__TITLE__</title>
<script src="__PLOTLY__"></script>
<style>
  body { font-family: sans-serif; margin: 2em; }
  #return-selector label { margin-right: 1.2em; }
  #returns-scatter-plot { width: 100%; height: 600px; }
</style>
</head>
<body>
<h1>__TITLE__</h1>
<label>__LABEL__</label>
<div id="return-selector">
__CHECKLIST__
</div>
<div id="returns-scatter-plot"></div>
<script>
const boxes = Array.from(document.querySelectorAll('#return-selector input'));
let latest = 0;

async function refresh() {
  const ticket = ++latest;
  const fields = boxes.filter(b => b.checked).map(b => b.value).join(',');
  const response = await fetch('/api/figure?fields=' + encodeURIComponent(fields));
  if (ticket !== latest) return;
  if (!response.ok) {
    console.error('figure request failed', response.status);
    return;
  }
  const figure = await response.json();
  // a newer selection may have been made while the body was read
  if (ticket !== latest) return;
  Plotly.react('returns-scatter-plot', figure.data, figure.layout);
}

boxes.forEach(b => b.addEventListener('change', refresh));
refresh();
</script>
</body>
</html>
"#;

/// The dashboard page with one pre-checked box per field.
pub fn render_index(fields: &[ReturnField]) -> String {
    let checklist = fields
        .iter()
        .map(|field| {
            format!(
                r#"<label><input type="checkbox" value="{column}" checked> {column}</label>"#,
                column = field.column()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    TEMPLATE
        .replace("__TITLE__", PAGE_TITLE)
        .replace("__PLOTLY__", PLOTLY_JS)
        .replace("__LABEL__", SELECTOR_LABEL)
        .replace("__CHECKLIST__", &checklist)
}
