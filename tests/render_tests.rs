use ode_client::render::{HEADING_CLASS, MATH_BLOCK_CLASS};
use ode_client::{render, HtmlPolicy, Renderer};

fn heading(text: &str) -> String {
  format!("<h3 class=\"{HEADING_CLASS}\">{text}</h3>")
}

fn block(math: &str) -> String {
  format!("<div class=\"{MATH_BLOCK_CLASS}\">{math}</div>")
}

#[test]
fn empty_input_renders_nothing() {
  assert_eq!(render(""), "");
}

#[test]
fn step_heading_line_break_and_block_math() {
  insta::assert_snapshot!(
    render("**Paso 1** resultado \\[x^2+1\\]\nfin"),
    @r#"<h3 class="text-gray-300 font-bold mt-4 mb-2">Paso 1</h3> resultado <div class="my-3 p-2 bg-[#1a1a1a] rounded border border-[#3a3a3a]">\[x^2+1\]</div><br>fin"#
  );
}

mod headings {
  use super::*;

  #[test]
  fn english_and_spanish_step_markers() {
    assert_eq!(
      render("**Step 2** Integrate"),
      format!("{} Integrate", heading("Step 2"))
    );
    assert_eq!(
      render("**Paso 3: Separar variables**"),
      heading("Paso 3: Separar variables")
    );
  }

  #[test]
  fn other_bold_runs_are_unwrapped() {
    assert_eq!(render("The **general** solution"), "The general solution");
    assert_eq!(render("**Solution**"), "Solution");
  }

  #[test]
  fn heading_with_inline_math() {
    assert_eq!(
      render(r"**Paso 2: \( y' \)**"),
      heading(r"Paso 2: \(y'\)")
    );
  }

  #[test]
  fn one_heading_per_line() {
    assert_eq!(
      render("**Paso 1**\n**Paso 2**"),
      format!("{}<br>{}", heading("Paso 1"), heading("Paso 2"))
    );
  }
}

mod line_breaks {
  use super::*;

  #[test]
  fn newlines_become_breaks() {
    assert_eq!(render("a\nb\r\nc"), "a<br>b<br>c");
  }
}

mod math {
  use super::*;

  #[test]
  fn inline_padding_is_removed() {
    assert_eq!(render(r"\( x+1 \)"), r"\(x+1\)");
    assert_eq!(render(r"\(x+1\)"), r"\(x+1\)");
    assert_eq!(render(r"\( x+1\)"), r"\(x+1\)");
  }

  #[test]
  fn inline_spans_inside_prose() {
    assert_eq!(
      render(r"so \( y = C e^{x} \) and \(C\) is constant"),
      r"so \(y = C e^{x}\) and \(C\) is constant"
    );
  }

  #[test]
  fn block_interior_is_byte_identical() {
    let math = "\\[\n  y = e^{x} \\cdot **C**\n\\]";
    let rendered = render(&format!("before\n{math}\nafter"));
    assert_eq!(
      rendered,
      format!("before<br>{}<br>after", block(math))
    );
  }

  #[test]
  fn bold_markers_inside_inline_math_survive() {
    assert_eq!(render(r"\(x**2\) **bold**"), r"\(x**2\) bold");
  }

  #[test]
  fn several_blocks() {
    assert_eq!(
      render(r"\[a\]\[b\]"),
      format!("{}{}", block(r"\[a\]"), block(r"\[b\]"))
    );
  }

  #[test]
  fn private_use_markers_in_the_input_survive() {
    let raw = "\u{E000}0\u{E001} and \\(x\\)";
    assert_eq!(render(raw), raw);

    let inside = "\\[a \u{E000}1\u{E001}\\] \\(b\\)";
    assert_eq!(
      render(inside),
      format!("{} \\(b\\)", block("\\[a \u{E000}1\u{E001}\\]"))
    );
  }

  #[test]
  fn unterminated_delimiters_are_plain_text() {
    assert_eq!(render(r"\[ x + 1"), r"\[ x + 1");
    assert_eq!(render(r"\( x"), r"\( x");
  }
}

mod html_policy {
  use super::*;

  #[test]
  fn trusted_by_default() {
    assert_eq!(Renderer::default().policy(), HtmlPolicy::Trusted);
    assert_eq!(render("<b>x</b>"), "<b>x</b>");
  }

  #[test]
  fn escaping_skips_math() {
    let renderer = Renderer::new(HtmlPolicy::EscapeText);
    assert_eq!(
      renderer.render(r#"a < b & "c" \(x<1\) \[y>0\]"#),
      format!(r"a &lt; b &amp; &quot;c&quot; \(x<1\) {}", block(r"\[y>0\]"))
    );
  }

  #[test]
  fn escaping_keeps_generated_markup() {
    let renderer = Renderer::new(HtmlPolicy::EscapeText);
    assert_eq!(
      renderer.render("**Paso 1** <script>\nx"),
      format!("{} &lt;script&gt;<br>x", heading("Paso 1"))
    );
  }
}
