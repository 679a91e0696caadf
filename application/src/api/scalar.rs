//! GraphQL scalar definitions.

use std::{borrow::Cow, fmt, marker::PhantomData, str::FromStr};

use juniper::{
    GraphQLType, InputValue, ParseScalarResult, ParseScalarValue, ScalarToken,
    ScalarValue, Value,
};

/// Helper type to use in `#[graphql(with = ..)]` attribute.
///
/// Scalars are always output as strings, while string, integer and float
/// inputs are all accepted, so `"12.5"` and `12.5` denote the same
/// `TrailerLength`. Conversion goes through the [`FromStr`] and [`Display`]
/// impls of the `As` type, which the target type must wrap ([`TryFrom`] and
/// [`AsRef`] for `As`).
///
/// [`Display`]: fmt::Display
#[derive(Debug)]
pub struct Via<As>(PhantomData<As>);

impl<As> Via<As> {
    /// Outputs the target type as a string scalar.
    pub fn to_output<T, S>(value: &T) -> Value<S>
    where
        As: fmt::Display,
        T: AsRef<As>,
        S: ScalarValue,
    {
        Value::from(value.as_ref().to_string())
    }

    /// Constructs the target type from an input scalar.
    ///
    /// # Errors
    ///
    /// Errors if the input is neither a string nor a number, or if its
    /// textual form is rejected by the `As` type or the target type.
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    pub fn from_input<T, S>(input: &InputValue<S>) -> Result<T, String>
    where
        As: FromStr,
        As::Err: fmt::Display,
        T: TryFrom<As> + GraphQLType<S, TypeInfo = ()>,
        T::Error: fmt::Display,
        S: ScalarValue,
    {
        let name = T::name(&()).expect("always has a name");
        let raw = input_text(input).ok_or_else(|| {
            format!(
                "Cannot parse input scalar `{name}`: expected string or \
                 number, found: {input}",
            )
        })?;
        raw.parse::<As>()
            .map_err(|e| {
                format!(
                    "Cannot parse input scalar `{name}` from \"{raw}\": {e}",
                )
            })?
            .try_into()
            .map_err(|e| format!("Cannot parse input scalar `{name}`: {e}"))
    }

    /// Parses the provided [`ScalarToken`] keeping numeric literals as they
    /// were written.
    ///
    /// # Errors
    ///
    /// Errors if a string token is malformed.
    pub fn parse_token<S: ScalarValue>(
        value: ScalarToken<'_>,
    ) -> ParseScalarResult<S> {
        match value {
            ScalarToken::Int(s) | ScalarToken::Float(s) => {
                Ok(s.to_owned().into())
            }
            ScalarToken::String(_) => {
                <String as ParseScalarValue<S>>::from_str(value)
            }
        }
    }
}

/// Returns the textual form of the provided scalar `input`, if it has one.
fn input_text<S: ScalarValue>(input: &InputValue<S>) -> Option<Cow<'_, str>> {
    input
        .as_string_value()
        .map(Cow::Borrowed)
        .or_else(|| input.as_int_value().map(|i| i.to_string().into()))
        .or_else(|| input.as_float_value().map(|f| f.to_string().into()))
}

#[cfg(test)]
mod spec {
    use juniper::{DefaultScalarValue, InputValue};

    use super::input_text;

    #[test]
    fn reads_strings_and_numbers() {
        let s = InputValue::<DefaultScalarValue>::scalar("12.50".to_owned());
        let i = InputValue::<DefaultScalarValue>::scalar(7);
        let f = InputValue::<DefaultScalarValue>::scalar(12.5);

        assert_eq!(input_text(&s).as_deref(), Some("12.50"));
        assert_eq!(input_text(&i).as_deref(), Some("7"));
        assert_eq!(input_text(&f).as_deref(), Some("12.5"));
    }

    #[test]
    fn rejects_other_inputs() {
        assert!(input_text(&InputValue::<DefaultScalarValue>::null()).is_none());
        assert!(
            input_text(&InputValue::<DefaultScalarValue>::scalar(true))
                .is_none()
        );
    }
}
