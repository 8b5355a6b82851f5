// Back office de gestão de obras: CRUD de obras, almoxarifado com
// livro-razão de estoque, equipe, financeiro, anexos, chat e auditoria.
// A biblioteca existe para os testes de integração montarem o router
// e o estado sem passar pelo main.

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
