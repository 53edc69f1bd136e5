//! Sample equations users can load instead of typing one.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Example {
  pub equation: &'static str,
  pub description: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Category {
  pub name: &'static str,
  pub examples: &'static [Example],
}

const fn ex(equation: &'static str, description: &'static str) -> Example {
  Example {
    equation,
    description,
  }
}

pub const CATALOG: &[Category] = &[
  Category {
    name: "Separable",
    examples: &[
      ex("y' = x*y", "Basic separable form"),
      ex("y' = x/y", "Separable with division"),
      ex("y' = (1 + y^2)*cos(x)", "With trigonometric functions"),
    ],
  },
  Category {
    name: "First-order linear",
    examples: &[
      ex("y' + 2*y = x", "Simple linear"),
      ex("y' + y/x = x^2", "Variable coefficient"),
      ex("y' - 3*y = exp(x)", "With exponential"),
    ],
  },
  Category {
    name: "Exact",
    examples: &[
      ex("(2*x + y) + (x + 2*y)*y' = 0", "Basic exact"),
      ex("(2*x*y + 1) + (x^2 + 2*y)*y' = 0", "Exact with quadratic terms"),
    ],
  },
  Category {
    name: "Homogeneous",
    examples: &[
      ex("y' = (x + y)/x", "Simple homogeneous"),
      ex("y' = (x^2 + y^2)/(x*y)", "Homogeneous with squares"),
    ],
  },
  Category {
    name: "Second order, constant coefficients",
    examples: &[
      ex("y'' + 4*y = 0", "Imaginary roots"),
      ex("y'' - 5*y' + 6*y = 0", "Distinct real roots"),
      ex("y'' - 4*y' + 4*y = 0", "Repeated roots"),
    ],
  },
  Category {
    name: "Second order, non-homogeneous",
    examples: &[
      ex("y'' + y = sin(x)", "Sinusoidal forcing"),
      ex("y'' + 4*y = exp(x)", "Exponential forcing"),
      ex("y'' - y = x^2", "Polynomial forcing"),
    ],
  },
];

/// Every example with its 1-based number, in catalog order.
pub fn numbered(
) -> impl Iterator<Item = (usize, &'static Category, &'static Example)> {
  CATALOG
    .iter()
    .flat_map(|category| {
      category.examples.iter().map(move |example| (category, example))
    })
    .enumerate()
    .map(|(index, (category, example))| (index + 1, category, example))
}

/// Look up an example by the number [`numbered`] gives it.
pub fn example(number: usize) -> Option<&'static Example> {
  numbered()
    .find(|(n, _, _)| *n == number)
    .map(|(_, _, example)| example)
}
