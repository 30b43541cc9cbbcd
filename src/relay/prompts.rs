//! Prompt templates for the three relay steps.
//!
//! Each template has exactly one `{texto}` insertion point. The pasted text is
//! embedded verbatim; delimiter sequences already present in it are not
//! escaped. The classify prompt also asks for `-----` separators to be
//! kept so its output can feed the reply step.

/// Separates individual emails in split and classified output.
pub const EMAIL_DELIMITER: &str = "-----";

/// Separates an email from its suggested reply.
pub const REPLY_DELIMITER: &str = "=====";

/// Prefix the model is asked to put in front of each suggested reply.
pub const REPLY_MARKER: &str = "Sugestão de Resposta:";

/// Label for emails that need an action or answer.
pub const LABEL_PRODUCTIVE: &str = "Produtivo";

/// Label for emails that need no action.
pub const LABEL_UNPRODUCTIVE: &str = "Improdutivo";

const PLACEHOLDER: &str = "{texto}";

pub const SPLIT_TEMPLATE: &str = "
O texto a seguir contém vários e-mails, possivelmente misturados com outros textos, 
e eles estão concatenados em uma única string.

Por favor, analise o texto e separe os emails com -----.

NÃO inclua nenhuma explicação, texto adicional, ou formatação além dos emails separados com -----.

TEXTO:
---
{texto}
---
";

pub const CLASSIFY_TEMPLATE: &str = "
O texto a seguir contém vários e-mails, separados por -----.

Por favor, analise os emails cada um individualmente e classifique cada em um dos emails em um desses dois tipos:

-Tipo Produtivo: Emails que requerem uma ação ou resposta específica (ex.: solicitações de suporte técnico, atualização sobre casos em aberto, dúvidas sobre o sistema).

-Tipo Improdutivo: Emails que não necessitam de uma ação imediata (ex.: mensagens de felicitações, agradecimentos).

Mantenha os emails separados por -----.

NÃO inclua nenhuma explicação, texto adicional, ou formatação além dos emails completos com suas classificaçôes.

TEXTO:
---
{texto}
---
";

pub const DRAFT_REPLY_TEMPLATE: &str = "
O texto a seguir contém vários e-mails, separados por ----- e classificados com um tipo.

Por favor, analise os emails e o tipo de cada um individualmente e crie uma sugestão de resposta para cada e separe a sugestão do resto do email com ===== e comece com sua sugestão com 'Sugestão de Resposta:':

NÃO inclua nenhuma explicação, texto adicional, ou formatação além dos email com suas classificaçôes e sugestões de resposta.

TEXTO:
---
{texto}
---
";

/// Substitute `text` into the template's single insertion point.
pub fn render_prompt(template: &str, text: &str) -> String {
    template.replacen(PLACEHOLDER, text, 1)
}
