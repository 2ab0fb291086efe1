// src/services/storage.rs

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::common::error::AppError;

/// Armazenamento de imagens em disco local, servido estaticamente em
/// `/uploads`. Faz o papel do bucket de blobs: gravar bytes e devolver a
/// URL pública correspondente.
#[derive(Clone)]
pub struct ImageStorage {
    root: PathBuf,
    public_base: String,
}

impl ImageStorage {
    pub fn new(root: PathBuf, public_base: &str) -> Self {
        Self {
            root,
            public_base: public_base.trim_end_matches('/').to_string(),
        }
    }

    /// Grava os bytes no caminho relativo, criando diretórios intermediários.
    pub async fn store(&self, relative_path: &str, bytes: &[u8]) -> Result<(), AppError> {
        let full_path = self.root.join(relative_path);
        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&full_path, bytes).await?;
        Ok(())
    }

    pub fn public_url(&self, relative_path: &str) -> String {
        format!("{}/uploads/{}", self.public_base, relative_path)
    }

    /// Nome aleatório preservando a extensão do arquivo enviado.
    pub fn profile_image_path(original_name: &str) -> String {
        let extension = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("png");
        format!("profiles/{}.{}", Uuid::new_v4(), extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_publica_junta_base_e_caminho() {
        let storage = ImageStorage::new(PathBuf::from("/tmp/x"), "https://cartao.exemplo.com/");
        assert_eq!(
            storage.public_url("profiles/a.png"),
            "https://cartao.exemplo.com/uploads/profiles/a.png"
        );
    }

    #[test]
    fn caminho_de_imagem_preserva_extensao() {
        let path = ImageStorage::profile_image_path("foto de perfil.jpeg");
        assert!(path.starts_with("profiles/"));
        assert!(path.ends_with(".jpeg"));
    }

    #[test]
    fn extensao_ausente_cai_em_png() {
        let path = ImageStorage::profile_image_path("semextensao");
        assert!(path.ends_with(".png"));
    }

    #[tokio::test]
    async fn grava_e_le_de_volta() {
        let root = std::env::temp_dir().join(format!("cartao-digital-teste-{}", Uuid::new_v4()));
        let storage = ImageStorage::new(root.clone(), "http://localhost:3000");

        storage
            .store("profiles/teste.png", b"bytes da imagem")
            .await
            .expect("gravação falhou");

        let read_back = tokio::fs::read(root.join("profiles/teste.png"))
            .await
            .expect("leitura falhou");
        assert_eq!(read_back, b"bytes da imagem");

        let _ = tokio::fs::remove_dir_all(root).await;
    }
}
