// Author: Dustin Pilgrim
// License: MIT

use super::*;
use crate::tree::Members;

const MEMBER_EXPECTED: &str = "Entity or key definition";
const ROOT: &str = "<root>";

/// `config := (key_or_entity)* EOF`
/// `entity := "{" ID key_or_entity (key_or_entity)* "}"`
///
/// Entities still open sit on an explicit stack, innermost last. Each one
/// owns what has been attached to it so far and joins its parent once its
/// closing `"}" ";"` is read. Any early return drops the stack and the root
/// together with everything attached to them.
pub(super) fn parse_configuration<R: Read>(parser: &mut Parser<R>) -> Result<Configuration, ConfError> {
    let mut configuration = Configuration::new();
    let mut open: Vec<Entity> = Vec::new();

    loop {
        let token = parser.bump()?;
        let id = match token {
            Token::Ident(id) => id,
            Token::Eof if open.is_empty() => break,
            Token::RBrace => match open.pop() {
                Some(entity) if has_members(&entity) => {
                    parser.expect(Token::Semicolon, ";")?;
                    let (scope, owner) = scope_of(&mut configuration, &mut open);
                    attach_entity(scope, entity, &owner);
                    continue;
                }
                // an entity body needs at least one member
                _ => return Err(parser.unexpected(&Token::RBrace, MEMBER_EXPECTED)),
            },
            other => {
                let expected = match open.last() {
                    Some(entity) if has_members(entity) => "}",
                    _ => MEMBER_EXPECTED,
                };
                return Err(parser.unexpected(&other, expected));
            }
        };

        match key_or_entity(parser, id, open.len())? {
            Member::Entity(entity) => open.push(entity),
            Member::Key(key) => {
                let (scope, owner) = scope_of(&mut configuration, &mut open);
                attach_key(scope, key, &owner);
            }
        }
    }

    tracing::debug!(
        keys = configuration.len_keys(),
        entities = configuration.len_entities(),
        "configuration parsed"
    );
    Ok(configuration)
}

/// `key_or_entity := ID (":" entity | "=" key) ";"`
///
/// The identifier has already been consumed by the caller. A key comes back
/// finished, `;` included. An entity comes back freshly opened, right after
/// its `{`; its body and closing `"}" ";"` are read by the caller.
pub(super) fn key_or_entity<R: Read>(
    parser: &mut Parser<R>,
    id: String,
    depth: usize,
) -> Result<Member, ConfError> {
    tracing::trace!(%id, depth, "key_or_entity");

    match parser.bump()? {
        Token::Colon => {
            parser.expect(Token::LBrace, "{")?;
            Ok(Member::Entity(Entity::new(id)))
        }
        Token::Assign => {
            let key = value::key(parser, id)?;
            parser.expect(Token::Semicolon, ";")?;
            Ok(Member::Key(key))
        }
        other => Err(parser.unexpected(&other, ": or =")),
    }
}

fn has_members(entity: &Entity) -> bool {
    entity.len_keys() + entity.len_entities() > 0
}

/// Innermost open scope and its id for logging.
fn scope_of<'a>(configuration: &'a mut Configuration, open: &'a mut [Entity]) -> (&'a mut Members, String) {
    match open.last_mut() {
        Some(entity) => {
            let owner = entity.id().to_string();
            (entity.members_mut(), owner)
        }
        None => (configuration.members_mut(), ROOT.to_string()),
    }
}

fn attach_key(scope: &mut Members, key: Key, owner: &str) {
    let id = key.id().to_string();
    match scope.add_key(key) {
        None => tracing::debug!(owner, %id, "key attached"),
        // first definition wins
        Some(_) => tracing::debug!(owner, %id, "duplicate key dropped"),
    }
}

fn attach_entity(scope: &mut Members, entity: Entity, owner: &str) {
    let id = entity.id().to_string();
    match scope.add_entity(entity) {
        None => tracing::debug!(owner, %id, "entity attached"),
        Some(_) => tracing::debug!(owner, %id, "duplicate entity dropped"),
    }
}
