//! Built-in stubs
//!
//! Handlebars templates with HTML escaping disabled. Custom stubs with the same
//! name in the configured stubs directory take precedence.

/// DTO class stub
///
/// Context: `namespace`, `class`, `parentClass`, `parentClassShort`, `model`,
/// `fields`, and the pre-joined `rules`, `messages` and `attributes` blocks.
pub const DTO_STUB: &str = r"<?php

namespace {{namespace}};

{{#if parentClass}}
use {{parentClass}};

{{/if}}
/**
 * Data transfer object for {{model}}.
 */
class {{class}}{{#if parentClassShort}} extends {{parentClassShort}}{{/if}}
{
    /**
     * Validation rules.
     *
     * @return array<string, array<int, string>>
     */
    public static function rules(): array
    {
        return [
{{rules}}
        ];
    }

    /**
     * Validation messages.
     *
     * @return array<string, string>
     */
    public static function messages(): array
    {
        return [
{{messages}}
        ];
    }

    /**
     * Attribute labels.
     *
     * @return array<string, string>
     */
    public static function attributes(): array
    {
        return [
{{attributes}}
        ];
    }
}
";

/// Organizer class stub
///
/// Context: the DTO keys plus `table`, `dataClass`, `dataNamespace`,
/// `dataClassFqcn` and
/// `operations` (`name`, `method`, `parameters`, `arguments`, `returnType`).
pub const ORGANIZER_STUB: &str = r"<?php

namespace {{namespace}};

{{#if parentClass}}
use {{parentClass}};
{{/if}}
use {{dataClassFqcn}};

/**
 * Operations for {{model}} records.
 */
class {{class}}{{#if parentClassShort}} extends {{parentClassShort}}{{/if}}
{
    protected string $table = '{{table}}';

    protected string $dataClass = {{dataClass}}::class;
{{#each operations}}

    public function {{name}}({{parameters}}): {{returnType}}
    {
        return $this->{{method}}({{arguments}});
    }
{{/each}}
}
";

/// Built-in stubs by file name
pub const BUILTIN_STUBS: &[(&str, &str)] = &[
    ("dto.stub.hbs", DTO_STUB),
    ("organizer.stub.hbs", ORGANIZER_STUB),
];

/// Built-in stub by file name
#[must_use]
pub fn builtin(name: &str) -> Option<&'static str> {
    BUILTIN_STUBS
        .iter()
        .find(|(stub, _)| *stub == name)
        .map(|(_, source)| *source)
}
