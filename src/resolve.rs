use std::collections::HashMap;

use tracing::trace;

use crate::{
    broadcast::{DeploymentTransaction, TransactionType},
    types::{ContractAddress, ContractName},
};

/// Factories whose created contract is published under the product name.
const FACTORY_PRODUCTS: &[(&str, &str)] = &[("LiquidationPairFactory", "LiquidationPair")];

/// Last contract name seen for each address, in transaction order.
#[derive(Debug, Default)]
pub struct AddressBook {
    names: HashMap<ContractAddress, ContractName>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, address: &str, name: &str) {
        self.names.insert(address.to_owned(), name.to_owned());
    }

    pub fn name_of(&self, address: &str) -> Option<&str> {
        self.names.get(address).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// A contract that was actually created, directly or through a factory call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDeployment<'a> {
    pub address: &'a str,
    pub name: Option<ContractName>,
    pub arguments: &'a [String],
}

pub fn product_name(name: &str) -> &str {
    FACTORY_PRODUCTS
        .iter()
        .find(|(factory, _)| *factory == name)
        .map_or(name, |&(_, product)| product)
}

/// Resolves one transaction, recording its name in `book` first.
///
/// Returns `None` when the transaction did not create a contract.
pub fn resolve_transaction<'a>(
    book: &mut AddressBook,
    transaction: &'a DeploymentTransaction,
) -> Option<ResolvedDeployment<'a>> {
    if let Some(name) = &transaction.contract_name {
        book.record(&transaction.contract_address, name);
    }

    let mut transaction_type = transaction.transaction_type;
    let mut address = transaction.contract_address.as_str();
    let mut name = transaction.contract_name.clone();

    let created_contract = transaction
        .additional_contracts
        .first()
        .filter(|created| created.transaction_type == TransactionType::Create);

    if let (TransactionType::Call, Some(created)) = (transaction_type, created_contract) {
        if name.is_none() {
            name = book.name_of(address).map(str::to_owned);
        }

        transaction_type = TransactionType::Create;
        address = created.address.as_str();
    }

    if transaction_type != TransactionType::Create {
        trace!(
            address = %transaction.contract_address,
            transaction_type = ?transaction.transaction_type,
            "Skipping transaction without contract creation"
        );
        return None;
    }

    Some(ResolvedDeployment {
        address,
        name: name.map(|name| product_name(&name).to_owned()),
        arguments: &transaction.arguments,
    })
}

pub fn resolve_transactions<'a>(
    book: &mut AddressBook,
    transactions: &'a [DeploymentTransaction],
) -> Vec<ResolvedDeployment<'a>> {
    transactions
        .iter()
        .filter_map(|transaction| resolve_transaction(book, transaction))
        .collect()
}
