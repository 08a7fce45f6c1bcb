use proc_macro::Delimiter;
use proc_macro::Group;
use proc_macro::Ident;
use proc_macro::Literal;
use proc_macro::Punct;
use proc_macro::Spacing;
use proc_macro::Span;
use proc_macro::TokenStream;
use proc_macro::TokenTree;

/// Unrolls the body of the annotated dummy function `count` times.
///
/// `#[loop_unroll(i, start, count)]` or `#[loop_unroll(i, start, count, step)]`.
/// The index variable is declared as `let mut i = start;` and advanced by `step`
/// between copies of the body. Use `_` as the index name when the body does not
/// need it.
#[proc_macro_attribute]
pub fn loop_unroll(attr: TokenStream, item: TokenStream) -> TokenStream {
    match expand(attr, item) {
        Ok(output) => output,
        Err(msg) => compile_error(msg),
    }
}

struct UnrollArgs {
    index: Option<Ident>,
    start: Literal,
    count: usize,
    step: Literal,
}

fn parse_args(attr: TokenStream) -> Result<UnrollArgs, &'static str> {
    // drop the separating commas, keep the operands
    let args: Vec<TokenTree> = attr
        .into_iter()
        .filter(|tt| !matches!(tt, TokenTree::Punct(p) if p.as_char() == ','))
        .collect();

    if args.len() != 3 && args.len() != 4 {
        return Err("expected `loop_unroll(index, start, count)` or `loop_unroll(index, start, count, step)`");
    }

    let index = match &args[0] {
        TokenTree::Ident(ident) if ident.to_string() == "_" => None,
        TokenTree::Ident(ident) => Some(ident.clone()),
        _ => return Err("first argument must be an identifier or `_`"),
    };
    let start = match &args[1] {
        TokenTree::Literal(lit) => lit.clone(),
        _ => return Err("second argument must be an integer literal"),
    };
    let count = match &args[2] {
        TokenTree::Literal(lit) => lit
            .to_string()
            .trim_end_matches("usize")
            .parse::<usize>()
            .map_err(|_| "third argument must be an unsuffixed integer literal")?,
        _ => return Err("third argument must be an integer literal"),
    };
    let step = match args.get(3) {
        Some(TokenTree::Literal(lit)) => lit.clone(),
        Some(_) => return Err("fourth argument must be an integer literal"),
        None => Literal::usize_unsuffixed(1),
    };

    if count == 0 {
        return Err("loop count must be at least 1");
    }

    Ok(UnrollArgs { index, start, count, step })
}

fn expand(attr: TokenStream, item: TokenStream) -> Result<TokenStream, &'static str> {
    let args = parse_args(attr)?;

    // the body is the first brace group, whatever precedes it (`fn name()`) is ignored
    let body = item
        .into_iter()
        .find(|tt| matches!(tt, TokenTree::Group(g) if g.delimiter() == Delimiter::Brace))
        .ok_or("loop_unroll must be applied to a function with a body")?;

    let mut output = TokenStream::new();

    if let Some(index) = &args.index {
        output.extend([
            TokenTree::Ident(Ident::new("let", Span::call_site())),
            TokenTree::Ident(Ident::new("mut", Span::call_site())),
            TokenTree::Ident(index.clone()),
            TokenTree::Punct(Punct::new('=', Spacing::Alone)),
            TokenTree::Literal(args.start.clone()),
            TokenTree::Punct(Punct::new(';', Spacing::Alone)),
        ]);
    }

    for n in 0..args.count {
        output.extend([body.clone()]);
        if n + 1 == args.count {
            break;
        }
        if let Some(index) = &args.index {
            output.extend([
                TokenTree::Ident(index.clone()),
                TokenTree::Punct(Punct::new('+', Spacing::Joint)),
                TokenTree::Punct(Punct::new('=', Spacing::Alone)),
                TokenTree::Literal(args.step.clone()),
                TokenTree::Punct(Punct::new(';', Spacing::Alone)),
            ]);
        }
    }

    Ok(TokenStream::from(TokenTree::Group(Group::new(Delimiter::Brace, output))))
}

fn compile_error(msg: &str) -> TokenStream {
    let mut args = TokenStream::new();
    args.extend([TokenTree::Literal(Literal::string(msg))]);
    TokenStream::from_iter([
        TokenTree::Ident(Ident::new("compile_error", Span::call_site())),
        TokenTree::Punct(Punct::new('!', Spacing::Alone)),
        TokenTree::Group(Group::new(Delimiter::Parenthesis, args)),
        TokenTree::Punct(Punct::new(';', Spacing::Alone)),
    ])
}
