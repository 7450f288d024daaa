//! Document templates around a finished formula
//!
//! Pure substitution, no logic. The LaTeX template feeds the
//! pdflatex/convert pipeline; the HTML template is for people who would
//! rather render in a browser via MathJax.

/// Standalone LaTeX document: white formula on a black page
pub fn latex_document(formula: &str) -> String {
    format!(
        "\\documentclass[preview,border=20pt]{{standalone}}\n\
         \\usepackage{{amsmath,amssymb,amsfonts}}\n\
         \\usepackage{{xcolor}}\n\
         \\pagecolor{{black}}\n\
         \\color{{white}}\n\
         \n\
         \\begin{{document}}\n\
         \\begin{{equation*}}\n\
         \\displaystyle\n\
         {formula}\n\
         \\end{{equation*}}\n\
         \\end{{document}}\n"
    )
}

/// Self-contained dark HTML page that renders the formula with MathJax
pub fn html_page(formula: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>math slop</title>
<script src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-svg.js"></script>
<style>
  body {{ background: #000; color: #fff; margin: 0; }}
  .container {{ display: flex; justify-content: center; align-items: center; min-height: 100vh; font-size: 2em; }}
</style>
</head>
<body>
<div class="container">
$${formula}$$
</div>
</body>
</html>
"#
    )
}
