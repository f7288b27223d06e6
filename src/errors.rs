use thiserror::Error;

/// Erros possíveis ao carregar e consultar o tarifário
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Falha ao ler ou desserializar o CSV (detalhe na mensagem)
    #[error("Load failed: {0}")]
    LoadFailed(String),

    /// Erro ao ler o conteúdo do arquivo do disco
    #[error("Failed to read file content: {0}")]
    ReadContentFailed(#[from] std::io::Error),

    /// O builder foi chamado sem fornecer conteúdo nem caminho de arquivo
    #[error("Content or filepath is required")]
    MissingContentAndFilepath,

    /// O CSV foi lido, mas nenhuma linha tinha processo ou tarifa
    #[error("No records found")]
    NoRecords,

    /// Consulta feita antes de o conjunto de dados terminar de carregar
    #[error("Catalog is not ready")]
    NotReady,

    /// Falha ao serializar uma página para a camada de renderização
    #[error("Serialization failed: {0}")]
    SerializeFailed(#[from] serde_json::Error),
}

/// Alias conveniente para Result com nosso tipo de erro principal
pub type CatalogResult<T> = Result<T, CatalogError>;
