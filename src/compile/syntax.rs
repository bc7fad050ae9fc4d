use morel::Syntax;

/// Markers that identify expressions and tags within text.
pub enum Marker {
    /// Beginning of an Expression, which renders a value from the Store.
    BeginExpression = 0,
    /// End of an Expression.
    EndExpression = 1,
    /// Same as BeginExpression, but causes the trailing whitespace of the
    /// preceding raw text to be removed.
    BeginExpressionTrim = 2,
    /// Same as EndExpression, but causes the leading whitespace of the
    /// following raw text to be removed.
    EndExpressionTrim = 3,
    /// Beginning of a Tag, which holds constructs such as "block"
    /// and "extends".
    BeginTag = 4,
    /// End of a Tag.
    EndTag = 5,
    /// Same as BeginTag, but causes the trailing whitespace of the
    /// preceding raw text to be removed.
    BeginTagTrim = 6,
    /// Same as EndTag, but causes the leading whitespace of the
    /// following raw text to be removed.
    EndTagTrim = 7,
}

impl From<usize> for Marker {
    fn from(value: usize) -> Self {
        match value {
            0 => Self::BeginExpression,
            1 => Self::EndExpression,
            2 => Self::BeginExpressionTrim,
            3 => Self::EndExpressionTrim,
            4 => Self::BeginTag,
            5 => Self::EndTag,
            6 => Self::BeginTagTrim,
            7 => Self::EndTagTrim,
            _ => unreachable!(),
        }
    }
}

impl From<Marker> for usize {
    fn from(k: Marker) -> Self {
        k as usize
    }
}

/// Provides methods to build a `Syntax`.
///
/// # Example
///
/// ```
/// use aspen::Builder;
///
/// let syntax = Builder::new()
///     .with_expression("((", "))")
///     .with_tag("(*", "*)")
///     .to_syntax();
/// ```
pub struct Builder<'marker> {
    expression: (&'marker str, &'marker str),
    tag: (&'marker str, &'marker str),
    whitespace: &'marker char,
}

impl<'marker> Builder<'marker> {
    /// Create a new [`Builder`].
    ///
    /// The `Builder` has default markers:
    ///
    /// ```text
    /// Expressions: {{ name }}
    /// Tags: {% block ... %}
    /// Whitespace:
    ///     Expression: {{- name -}}
    ///     Tag: {%- block ... -%}
    /// ```
    ///
    /// To proceed with these defaults, you may immediately call `to_syntax` to receive the
    /// [`Syntax`] instance.
    #[inline]
    pub fn new() -> Self {
        Self {
            expression: ("{{", "}}"),
            tag: ("{%", "%}"),
            whitespace: &'-',
        }
    }

    /// Set the expression markers.
    ///
    /// # Examples
    ///
    /// ```
    /// use aspen::Builder;
    ///
    /// let mut builder = Builder::new();
    /// builder.set_expression("((", "))");
    /// ```
    #[inline]
    pub fn set_expression(&mut self, begin: &'marker str, end: &'marker str) {
        self.expression = (begin, end);
    }

    /// Set the expression markers.
    ///
    /// Returns the [`Builder`], so additional methods may be chained.
    ///
    /// ```
    /// use aspen::Builder;
    ///
    /// Builder::new()
    ///     .with_expression("((", "))");
    /// ```
    #[inline]
    pub fn with_expression(mut self, begin: &'marker str, end: &'marker str) -> Self {
        self.set_expression(begin, end);

        self
    }

    /// Set the tag markers.
    ///
    /// # Examples
    ///
    /// ```
    /// use aspen::Builder;
    ///
    /// let mut builder = Builder::new();
    /// builder.set_tag("(*", "*)");
    /// ```
    #[inline]
    pub fn set_tag(&mut self, begin: &'marker str, end: &'marker str) {
        self.tag = (begin, end);
    }

    /// Set the tag markers.
    ///
    /// Returns the [`Builder`], so additional methods may be chained.
    ///
    /// # Examples
    ///
    /// ```
    /// use aspen::Builder;
    ///
    /// Builder::new()
    ///     .with_tag("(*", "*)");
    /// ```
    #[inline]
    pub fn with_tag(mut self, begin: &'marker str, end: &'marker str) -> Self {
        self.set_tag(begin, end);

        self
    }

    /// Set the whitespace trim character.
    ///
    /// # Examples
    ///
    /// ```
    /// use aspen::Builder;
    ///
    /// let mut builder = Builder::new();
    /// builder.set_whitespace(&'!');
    /// ```
    #[inline]
    pub fn set_whitespace(&mut self, character: &'marker char) {
        self.whitespace = character;
    }

    /// Set the whitespace trim character.
    ///
    /// Returns the Builder, so additional methods may be chained.
    ///
    /// # Examples
    ///
    /// ```
    /// use aspen::Builder;
    ///
    /// Builder::new()
    ///     .with_whitespace(&'!');
    /// ```
    #[inline]
    pub fn with_whitespace(mut self, character: &'marker char) -> Self {
        self.set_whitespace(character);

        self
    }

    /// Return a Syntax instance from the markers in this [`Builder`].
    ///
    /// # Examples
    ///
    /// ```
    /// use aspen::Builder;
    ///
    /// let syntax = Builder::new()
    ///     .with_expression("((", "))")
    ///     .with_tag("(*", "*)")
    ///     .with_whitespace(&'!')
    ///     .to_syntax();
    /// ```
    pub fn to_syntax(self) -> Syntax {
        let mut markers = Vec::new();
        let (left_expression, right_expression) = self.expression;
        let (left_tag, right_tag) = self.tag;
        let whitespace = self.whitespace;

        markers.push((Marker::BeginExpression.into(), left_expression.into()));
        markers.push((Marker::EndExpression.into(), right_expression.into()));
        markers.push((
            Marker::BeginExpressionTrim.into(),
            format!("{left_expression}{whitespace}"),
        ));
        markers.push((
            Marker::EndExpressionTrim.into(),
            format!("{whitespace}{right_expression}"),
        ));
        markers.push((Marker::BeginTag.into(), left_tag.into()));
        markers.push((Marker::EndTag.into(), right_tag.into()));
        markers.push((
            Marker::BeginTagTrim.into(),
            format!("{left_tag}{whitespace}"),
        ));
        markers.push((
            Marker::EndTagTrim.into(),
            format!("{whitespace}{right_tag}"),
        ));

        Syntax::new(markers)
    }
}
